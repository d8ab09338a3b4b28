#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Rendering tests: ordering, unknown tags, icons, image precedence, and
//! boundary counts.

use serde_json::{Value, json};
use vitrine_engine::content::{BlockList, CdnAssetResolver, Document, FeatureIcon};
use vitrine_engine::render::{Rendered, Renderer};
use vitrine_test_utils::image_pairs::{self, ASSET_REF, PLAIN_URL};
use vitrine_test_utils::{assert, features, test_block, test_document, test_feature};

const CDN: &str = "https://cdn.test";
const ASSET_URL: &str = "https://cdn.test/abc123-800x600.png";

fn renderer() -> Renderer {
    Renderer::new(CdnAssetResolver::new(CDN))
}

fn render_blocks(values: Vec<Value>) -> Rendered {
    renderer().render_block_list(&BlockList::from_values(&values))
}

fn render_document(value: &Value) -> Rendered {
    renderer().render(&Document::from_value(value).unwrap())
}

// ---------------------------------------------------------------------------
// Example scenarios
// ---------------------------------------------------------------------------

#[test]
fn quote_with_author_shows_attribution() {
    let out = render_blocks(vec![test_block(
        "quoteBlock",
        "q",
        json!({ "quote": "Great product", "author": "Jane" }),
    )]);
    assert::contains(&out.html, "Great product");
    assert::contains(&out.html, "— Jane");
    assert!(out.is_clean());
}

#[test]
fn quote_without_author_has_no_attribution_line() {
    let out = render_blocks(vec![test_block(
        "quoteBlock",
        "q",
        json!({ "quote": "Great product" }),
    )]);
    assert::contains(&out.html, "Great product");
    assert::not_contains(&out.html, "—");
}

#[test]
fn feature_card_sun_icon_prefixes_title() {
    let out = render_blocks(vec![test_block(
        "featureCardsBlock",
        "fc",
        json!({ "items": [{ "_key": "c", "icon": "sun", "title": "Daylight" }] }),
    )]);
    assert::contains(&out.html, "☀️</span> Daylight");
}

#[test]
fn unknown_tag_between_known_blocks() {
    let out = render_blocks(vec![
        test_block("gridBlock", "g", json!({ "title": "Grid first" })),
        test_block("foo", "f", json!({})),
        test_block("quoteBlock", "q", json!({ "quote": "Quote last" })),
    ]);
    assert::in_order(&out.html, &["block--grid", "Grid first", "block--quote", "Quote last"]);
    assert_eq!(out.diagnostics.len(), 1, "exactly one diagnostic expected");
    assert_eq!(out.diagnostics[0].key, "f");
}

#[test]
fn testimonials_with_title_and_no_items() {
    let out = render_blocks(vec![test_block(
        "testimonialsBlock",
        "t",
        json!({ "title": "What people say", "items": [] }),
    )]);
    assert::contains(&out.html, "What people say");
    assert::contains(&out.html, "<div class=\"testimonials__items\">\n</div>");
    assert::not_contains(&out.html, "<figure");
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[test]
fn block_order_equals_stored_order() {
    let out = render_blocks(vec![
        test_block("philosophyBlock", "z", json!({ "text": "third?" })),
        test_block("specsBlock", "a", json!({ "items": ["first?"] })),
        test_block("diagramBlock", "m", json!({ "steps": ["second?"] })),
    ]);
    assert::in_order(
        &out.html,
        &[
            "data-block-key=\"z\"",
            "data-block-key=\"a\"",
            "data-block-key=\"m\"",
        ],
    );
}

#[test]
fn section_order_equals_stored_order() {
    let doc = test_document("Lamp")
        .with_section("faq", json!({ "title": "Questions" }))
        .with_section("callToAction", json!({ "title": "Buy" }))
        .with_hero_slides(3)
        .with_section("specs", json!({ "title": "Specs" }))
        .build();
    let out = render_document(&doc);
    assert::in_order(
        &out.html,
        &[
            "section--faq",
            "section--call-to-action",
            "section--hero",
            "section--specs",
        ],
    );
}

#[test]
fn empty_and_absent_modal_content_render_nothing() {
    let doc = test_document("Lamp")
        .with_features(vec![
            test_feature("a", "Empty").with_modal(vec![]),
            test_feature("b", "Absent"),
            test_feature("c", "Null").with_field("modalContent", Value::Null),
        ])
        .build();
    let out = render_document(&doc);
    assert_eq!(out.html.matches("<dialog").count(), 3);
    assert_eq!(out.html.matches("data-block-key").count(), 0);
    assert!(out.is_clean());
}

#[test]
fn modal_unknown_tag_does_not_affect_siblings() {
    let doc = test_document("Lamp")
        .with_features(vec![test_feature("bat", "Battery").with_modal(vec![
            test_block("detailBlock", "d", json!({ "text": "All day" })),
            test_block("carousel", "c", json!({})),
            test_block("quoteBlock", "q", json!({ "quote": "Wow" })),
        ])])
        .build();
    let out = render_document(&doc);
    assert::in_order(&out.html, &["All day", "Wow"]);
    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.diagnostics[0].key, "bat/c");
    assert_eq!(out.diagnostics[0].tag.as_deref(), Some("carousel"));
}

#[test]
fn malformed_feature_keeps_the_other_features_and_modals() {
    let mut list: Vec<_> = (0..8)
        .map(|i| {
            test_feature(&format!("f{i}"), &format!("Feature {i}")).with_modal(vec![test_block(
                "detailBlock",
                "d",
                json!({ "text": format!("Modal body {i}") }),
            )])
        })
        .collect();
    list.push(
        test_feature("f8", "Broken")
            .with_field("teaser", json!(42))
            .with_modal(vec![test_block("detailBlock", "d", json!({ "text": "Hidden" }))]),
    );
    let out = render_document(&test_document("Lamp").with_features(list).build());

    assert_eq!(out.html.matches("<dialog").count(), 8);
    for i in 0..8 {
        assert::contains(&out.html, &format!("Modal body {i}"));
    }
    assert::not_contains(&out.html, "Broken");
    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.diagnostics[0].key, "premiumDetails/f8");
}

#[test]
fn malformed_slide_keeps_the_other_slides() {
    let doc = test_document("Lamp")
        .with_section(
            "hero",
            json!({ "slides": [
                { "title": "A" },
                { "title": "B" },
                { "title": "C", "subtitle": 3 }
            ]}),
        )
        .build();
    let out = render_document(&doc);
    assert_eq!(out.html.matches("class=\"hero__slide\"").count(), 2);
    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.diagnostics[0].key, "hero/#2");
}

#[test]
fn unknown_top_level_keys_are_ignored() {
    let doc = test_document("Lamp")
        .with_section("newsletter", json!({ "title": "Sign up" }))
        .with_section("faq", json!({ "title": "Questions" }))
        .build();
    let out = render_document(&doc);
    assert::not_contains(&out.html, "Sign up");
    assert::contains(&out.html, "Questions");
    assert!(out.is_clean());
}

// ---------------------------------------------------------------------------
// Icons
// ---------------------------------------------------------------------------

#[test]
fn every_icon_renders_its_symbol() {
    let expected = [
        ("sun", "☀️"),
        ("moon", "🌙"),
        ("bolt", "⚡"),
        ("leaf", "🌿"),
        ("drop", "💧"),
        ("shield", "🛡️"),
        ("star", "⭐"),
        ("heart", "❤️"),
        ("sparkles", "✨"),
    ];
    assert_eq!(expected.len(), FeatureIcon::ALL.len());
    for (name, symbol) in expected {
        let out = render_blocks(vec![test_block(
            "featureCardsBlock",
            "fc",
            json!({ "items": [{ "icon": name, "title": "T" }] }),
        )]);
        assert::contains(&out.html, &format!(">{symbol}</span> T"));
    }
}

#[test]
fn unknown_or_absent_icon_renders_no_symbol() {
    let out = render_blocks(vec![test_block(
        "featureCardsBlock",
        "fc",
        json!({ "items": [
            { "icon": "volcano", "title": "A" },
            { "icon": null, "title": "B" },
            { "title": "C" }
        ]}),
    )]);
    assert::not_contains(&out.html, "feature-card__icon");
    assert_eq!(out.html.matches("<article").count(), 3);
}

// ---------------------------------------------------------------------------
// Image precedence
// ---------------------------------------------------------------------------

/// Every image-bearing block and section, built around one item.
fn image_cases(pair: fn(Value) -> Value) -> Vec<(&'static str, Value)> {
    vec![
        (
            "engineering",
            json!({ "blocks": [test_block(
                "engineeringBlock",
                "e",
                json!({ "items": [pair(json!({ "subtitle": "Frame" }))] }),
            )]}),
        ),
        (
            "feature cards",
            json!({ "blocks": [test_block(
                "featureCardsBlock",
                "f",
                json!({ "items": [pair(json!({ "title": "Card" }))] }),
            )]}),
        ),
        (
            "image showcase",
            json!({ "blocks": [test_block(
                "imageShowcaseBlock",
                "i",
                json!({ "images": [pair(json!({ "caption": "Front" }))] }),
            )]}),
        ),
        (
            "hero",
            json!({ "document": { "hero": { "slides": [pair(json!({ "title": "Slide" }))] } } }),
        ),
        (
            "process steps",
            json!({ "document": { "processSteps": { "steps": [pair(json!({ "title": "Step" }))] } } }),
        ),
        (
            "premium features",
            json!({ "document": { "premiumDetails": { "features": [pair(json!({ "title": "Feature" }))] } } }),
        ),
    ]
}

fn render_case(case: &Value) -> Rendered {
    match case.get("blocks") {
        Some(Value::Array(blocks)) => render_blocks(blocks.clone()),
        _ => render_document(&case["document"]),
    }
}

#[test]
fn both_sources_use_the_asset() {
    for (name, case) in image_cases(image_pairs::both) {
        let out = render_case(&case);
        assert!(
            out.html.contains(&format!("src=\"{ASSET_URL}\"")),
            "{name}: asset URL expected\n{}",
            out.html
        );
        assert!(!out.html.contains(PLAIN_URL), "{name}: plain URL must lose");
    }
}

#[test]
fn url_only_uses_the_url() {
    for (name, case) in image_cases(image_pairs::url_only) {
        let out = render_case(&case);
        assert!(
            out.html.contains(&format!("src=\"{PLAIN_URL}\"")),
            "{name}: plain URL expected\n{}",
            out.html
        );
        assert!(!out.html.contains(ASSET_REF));
    }
}

#[test]
fn neither_source_renders_no_image_node() {
    for (name, case) in image_cases(image_pairs::neither) {
        let out = render_case(&case);
        assert!(!out.html.contains("<img"), "{name}: no image expected");
        assert!(out.is_clean(), "{name}: missing image is not a diagnostic");
    }
}

// ---------------------------------------------------------------------------
// Boundary counts
// ---------------------------------------------------------------------------

#[test]
fn hero_slide_bounds_all_render() {
    for n in [2, 3, 10, 11] {
        let out = render_document(&test_document("Lamp").with_hero_slides(n).build());
        assert_eq!(
            out.html.matches("class=\"hero__slide\"").count(),
            n,
            "{n} slides should render"
        );
        assert!(out.is_clean());
    }
}

#[test]
fn premium_feature_counts_render_as_present() {
    for n in [8, 9] {
        let out = render_document(&test_document("Lamp").with_features(features(n)).build());
        assert_eq!(out.html.matches("<dialog").count(), n);
        assert_eq!(out.html.matches("class=\"premium-feature\"").count(), n);
    }
}

#[test]
fn process_step_counts_render_as_present() {
    for n in [5, 6] {
        let out = render_document(&test_document("Lamp").with_process_steps(n).build());
        assert_eq!(out.html.matches("class=\"process-step\"").count(), n);
        assert::contains(&out.html, &format!("<span class=\"process-step__number\">{n}</span>"));
    }
}

// ---------------------------------------------------------------------------
// Totality and concurrency
// ---------------------------------------------------------------------------

#[test]
fn hostile_values_never_abort_the_pass() {
    let out = render_blocks(vec![
        json!(null),
        json!("gridBlock"),
        json!({ "_type": 7 }),
        json!({ "_type": "gridBlock", "items": { "not": "a list" } }),
        json!({ "_type": "quoteBlock", "_key": "ok", "quote": "Survivor" }),
    ]);
    assert::contains(&out.html, "Survivor");
    assert_eq!(out.diagnostics.len(), 4);
}

#[test]
fn concurrent_renders_share_one_renderer() {
    let renderer = renderer();
    let doc = Document::from_value(
        &test_document("Lamp")
            .with_hero_slides(3)
            .with_features(features(9))
            .build(),
    )
    .unwrap();
    let expected = renderer.render(&doc);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| renderer.render(&doc)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
