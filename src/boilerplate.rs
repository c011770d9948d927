//! The bundled bot scaffold and the literal landmarks the assembler splices against.

/// Fragment landmarks. Each must appear verbatim and exactly once in a boilerplate.
pub const COMMANDS_MARKER: &str = "# --- Commands ---";
pub const HANDLERS_MARKER: &str = "# --- Handlers ---";
/// Includes the leading newline: the handlers region ends on the line break before it.
pub const FLASK_ROUTES_MARKER: &str = "\n# --- Flask routes ---";
pub const SET_WEBHOOK_MARKER: &str = "# --- Set webhook ---";

/// Assignment lines replaced by the start node's settings.
pub const TOKEN_LINE: &str = r#"TOKEN = os.getenv("BOT_TOKEN")"#;
pub const WEBHOOK_URL_LINE: &str = r#"WEBHOOK_URL = os.getenv("WEBHOOK_URL")"#;

/// Output used in place of generated source when the graph has no start node.
pub const MISSING_START_PLACEHOLDER: &str = r#"# Please add the "Start Bot" node to begin."#;

/// Python Telegram bot served through a Flask webhook.
pub const DEFAULT_BOILERPLATE: &str = r#"import os
import asyncio
import threading
import logging
import requests
import time
import traceback
from flask import Flask, request
from telegram import Update
from telegram.ext import Application, CommandHandler, MessageHandler, filters, CallbackContext
from dotenv import load_dotenv

# --- Load env vars ---
load_dotenv()
TOKEN = os.getenv("BOT_TOKEN")
WEBHOOK_URL = os.getenv("WEBHOOK_URL")

if not TOKEN:
    raise ValueError("BOT_TOKEN is missing.")

# --- Logger ---
logging.basicConfig(level=logging.INFO, format='%(asctime)s - %(levelname)s - %(message)s')
logger = logging.getLogger(__name__)

# --- Flask app ---
app = Flask(__name__)

# --- Async loop ---
def start_loop(loop):
    asyncio.set_event_loop(loop)
    loop.run_forever()

loop = asyncio.new_event_loop()
app.config["MAIN_LOOP"] = loop
threading.Thread(target=start_loop, args=(loop,), daemon=True).start()

# --- Telegram bot ---
telegram_app = Application.builder().token(TOKEN).build()

async def init_bot():
    if not telegram_app._initialized:
        await telegram_app.initialize()

asyncio.run_coroutine_threadsafe(init_bot(), loop).result(timeout=10)

# --- Commands ---
async def start(update: Update, context: CallbackContext):
    await update.message.reply_text("Welcome to the bot! Type /help for options.")

# --- Handlers ---
telegram_app.add_handler(CommandHandler("start", start))

# --- Flask routes ---
@app.route("/")
def home():
    return "Bot is running!"

@app.route("/webhook", methods=["POST"])
def webhook():
    update_json = request.get_json()
    update = Update.de_json(update_json, telegram_app.bot)
    asyncio.run_coroutine_threadsafe(telegram_app.process_update(update), loop)
    return "OK"

# --- Set webhook ---
async def set_webhook():
    await telegram_app.bot.set_webhook(WEBHOOK_URL)

# --- Optional: keep-alive ping ---
def keep_alive():
    while True:
        try:
            requests.get(WEBHOOK_URL.replace("/webhook", ""))
            logger.info("✅ Keep-alive ping sent.")
        except Exception as e:
            logger.error(f"⚠️ Ping failed: {e}")
        time.sleep(300)

# --- Entry Point ---
if __name__ == "__main__":
    loop.run_until_complete(set_webhook())
    threading.Thread(target=keep_alive, daemon=True).start()
    from waitress import serve
    serve(app, host="0.0.0.0", port=int(os.environ.get("PORT", 5000)))
"#;
