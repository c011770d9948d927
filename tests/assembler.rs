//! Tests for splicing generated fragments into a boilerplate.
use botflow::boilerplate::DEFAULT_BOILERPLATE;
use botflow::compiler::{Anchor, Fragments, TemplateAssembler};

const MINI_BOILERPLATE: &str = "TOKEN = os.getenv(\"BOT_TOKEN\")
# --- Commands ---
# --- Handlers ---
telegram_app.add_handler(CommandHandler(\"start\", start))

# --- Flask routes ---
# --- Set webhook ---
";

fn registration(trigger: &str) -> String {
    format!(
        "telegram_app.add_handler(CommandHandler(\"{}\", {}))",
        trigger, trigger
    )
}

#[test]
fn test_fragments_land_before_their_anchors() {
    let fragments = Fragments {
        methods: vec!["\nasync def m(update, context):\n    pass\n".to_string()],
        registrations: vec![registration("help")],
        routes: vec!["\n@app.route(\"/x\")\ndef x():\n    return \"OK\", 200\n".to_string()],
    };
    let (text, report) = TemplateAssembler::new(fragments)
        .with_token(Some("T".to_string()))
        .assemble(MINI_BOILERPLATE);

    assert_eq!(
        text,
        concat!(
            "TOKEN = \"T\"\n",
            "\nasync def m(update, context):\n    pass\n\n\n",
            "# --- Commands ---\n",
            "# --- Handlers ---\n",
            "telegram_app.add_handler(CommandHandler(\"start\", start))\n",
            "telegram_app.add_handler(CommandHandler(\"help\", help))\n",
            "\n# --- Flask routes ---\n",
            "\n@app.route(\"/x\")\ndef x():\n    return \"OK\", 200\n\n",
            "# --- Set webhook ---\n",
        )
    );
    assert!(report.missing_anchors.is_empty());
    assert!(report.token_substituted);
    assert_eq!(report.methods_inserted, 1);
    assert_eq!(report.registrations_inserted, 1);
    assert_eq!(report.routes_inserted, 1);
}

#[test]
fn test_duplicate_registrations_are_inserted_once() {
    let fragments = Fragments {
        registrations: vec![registration("help"), registration("help")],
        ..Fragments::default()
    };
    let (text, report) = TemplateAssembler::new(fragments).assemble(DEFAULT_BOILERPLATE);
    assert_eq!(text.matches(&registration("help")).count(), 1);
    assert_eq!(report.registrations_inserted, 1);
    assert_eq!(report.registrations_skipped, 1);
}

#[test]
fn test_existing_registration_is_not_repeated() {
    let fragments = Fragments {
        registrations: vec![registration("start")],
        ..Fragments::default()
    };
    let (text, report) = TemplateAssembler::new(fragments).assemble(DEFAULT_BOILERPLATE);
    assert_eq!(text, DEFAULT_BOILERPLATE);
    assert_eq!(report.registrations_skipped, 1);
}

#[test]
fn test_reassembling_own_output_changes_nothing() {
    let fragments = Fragments {
        methods: vec!["\nasync def m(update, context):\n    pass\n".to_string()],
        registrations: vec![registration("help"), registration("about")],
        routes: vec!["\n@app.route(\"/x\")\ndef x():\n    return \"OK\", 200\n".to_string()],
    };
    let assembler = TemplateAssembler::new(fragments).with_token(Some("T".to_string()));
    let (once, _) = assembler.assemble(DEFAULT_BOILERPLATE);
    let (twice, report) = assembler.assemble(&once);

    assert_eq!(once, twice);
    assert_eq!(report.registrations_inserted, 0);
    assert_eq!(report.registrations_skipped, 2);
    assert_eq!(report.methods_inserted, 0);
    assert_eq!(report.routes_inserted, 0);
}

#[test]
fn test_missing_anchors_make_steps_no_ops() {
    let fragments = Fragments {
        methods: vec!["def m(): pass\n".to_string()],
        registrations: vec![registration("help")],
        routes: vec!["def r(): pass\n".to_string()],
    };
    let (text, report) = TemplateAssembler::new(fragments).assemble("print('bare')\n");
    assert_eq!(text, "print('bare')\n");
    assert_eq!(
        report.missing_anchors,
        vec![Anchor::Commands, Anchor::Handlers, Anchor::FlaskRoutes]
    );
}

#[test]
fn test_set_webhook_before_flask_routes_is_not_used() {
    let boilerplate =
        "# --- Commands ---\n# --- Set webhook ---\n# --- Handlers ---\n\n# --- Flask routes ---\n";
    let fragments = Fragments {
        routes: vec!["def r(): pass\n".to_string()],
        ..Fragments::default()
    };
    let (text, report) = TemplateAssembler::new(fragments).assemble(boilerplate);
    assert_eq!(text, boilerplate);
    assert_eq!(report.missing_anchors, vec![Anchor::SetWebhook]);
}

#[test]
fn test_webhook_url_substitution_is_optional() {
    let (without, report) = TemplateAssembler::default().assemble(DEFAULT_BOILERPLATE);
    assert!(without.contains("WEBHOOK_URL = os.getenv(\"WEBHOOK_URL\")"));
    assert!(!report.webhook_url_substituted);

    let (with, report) = TemplateAssembler::default()
        .with_webhook_url(Some("https://bot.example.com/webhook".to_string()))
        .assemble(DEFAULT_BOILERPLATE);
    assert!(with.contains("WEBHOOK_URL = \"https://bot.example.com/webhook\"\n"));
    assert!(report.webhook_url_substituted);
}

#[test]
fn test_anchor_markers_appear_once_in_bundled_boilerplate() {
    let mut last = 0;
    for anchor in Anchor::ALL {
        assert_eq!(DEFAULT_BOILERPLATE.matches(anchor.marker()).count(), 1, "{}", anchor);
        let at = DEFAULT_BOILERPLATE.find(anchor.marker()).unwrap();
        assert!(at >= last, "{} is out of order", anchor);
        last = at;
    }
}

#[test]
fn test_substituted_settings_are_escaped() {
    let (text, report) = TemplateAssembler::default()
        .with_token(Some("12\"34".to_string()))
        .with_webhook_url(Some("https://x.example\\hook".to_string()))
        .assemble(DEFAULT_BOILERPLATE);
    assert!(report.token_substituted);
    assert!(text.contains("TOKEN = \"12\\\"34\"\n"));
    assert!(text.contains("WEBHOOK_URL = \"https://x.example\\\\hook\"\n"));
}
