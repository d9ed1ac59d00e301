//! Integration tests for scroll triggers + timelines + scoped contexts
//!
//! These tests verify that:
//! - Scrubbed values depend only on scroll position
//! - Scrolling forward then back lands on the same values
//! - Word reveals and typing labels preserve their text
//! - Releasing a context leaves the tree untouched by later events

use folio_animation::{
    rejoin_words, AnimationContext, ContextHandle, Easing, Position, ScrollTrigger, Timeline,
    Tween,
};
use folio_core::{
    event_types, ElementId, Event, EventData, EventDispatcher, LayoutBox, StyleProps, Viewport,
    VisualTree,
};

const WIDTH: f32 = 1280.0;
const HEIGHT: f32 = 800.0;

struct Fixture {
    tree: VisualTree,
    section: ElementId,
    cards: Vec<ElementId>,
    paragraph: ElementId,
}

fn fixture() -> Fixture {
    let mut tree = VisualTree::new(WIDTH, HEIGHT);
    let root = tree.root();
    tree.append(root, "section", &["hero"], LayoutBox::height(HEIGHT))
        .unwrap();
    let section = tree
        .append(root, "section", &["about"], LayoutBox::height(1600.0))
        .unwrap();
    let cards = (0..3)
        .map(|_| {
            tree.append(section, "div", &["card"], LayoutBox::height(200.0))
                .unwrap()
        })
        .collect();
    let paragraph = tree
        .append_text(
            section,
            "p",
            &["paragraph"],
            LayoutBox::height(120.0),
            "I design, build and ship web applications end to end.",
        )
        .unwrap();
    tree.append(root, "section", &["skills"], LayoutBox::height(HEIGHT))
        .unwrap();
    tree.compute_layout();
    Fixture {
        tree,
        section,
        cards,
        paragraph,
    }
}

fn scrubbed_cards(fx: &mut Fixture, lag: f32) -> AnimationContext {
    let mut ctx = AnimationContext::new("about", fx.section);
    let cards = ctx.select(&fx.tree, "card");
    let timeline = Timeline::new().with(
        Tween::from_to(
            cards,
            StyleProps::opacity(0.0).with_y(40.0),
            StyleProps::opacity(1.0).with_y(0.0),
        )
        .duration(0.6)
        .stagger(0.2)
        .ease("power3.out".parse::<Easing>().unwrap()),
        Position::At(0.0),
    );
    let trigger = ScrollTrigger::parse(fx.section, "top 75%", "bottom bottom")
        .unwrap()
        .scrub(lag);
    ctx.add(&mut fx.tree, "cards", timeline, Some(trigger))
        .unwrap();
    ctx
}

fn viewport(scroll_y: f32) -> Viewport {
    Viewport {
        scroll_y,
        width: WIDTH,
        height: HEIGHT,
    }
}

fn card_styles(fx: &Fixture) -> Vec<StyleProps> {
    fx.cards
        .iter()
        .map(|c| fx.tree.style(*c).unwrap().clone())
        .collect()
}

#[test]
fn test_same_scroll_gives_same_values() {
    let mut a = fixture();
    let mut b = fixture();
    let mut ctx_a = scrubbed_cards(&mut a, 0.0);
    let mut ctx_b = scrubbed_cards(&mut b, 0.0);

    ctx_a.on_scroll(&mut a.tree, viewport(700.0));
    ctx_b.on_scroll(&mut b.tree, viewport(100.0));
    ctx_b.on_scroll(&mut b.tree, viewport(700.0));

    assert_eq!(card_styles(&a), card_styles(&b));
}

#[test]
fn test_forward_then_back_is_reversible() {
    let mut fx = fixture();
    let mut ctx = scrubbed_cards(&mut fx, 0.0);

    ctx.on_scroll(&mut fx.tree, viewport(500.0));
    let reference = card_styles(&fx);

    for y in [600.0, 900.0, 1400.0, 2000.0, 1100.0, 500.0] {
        ctx.on_scroll(&mut fx.tree, viewport(y));
    }
    assert_eq!(card_styles(&fx), reference);
}

#[test]
fn test_window_edges_are_continuous() {
    let mut fx = fixture();
    let mut ctx = scrubbed_cards(&mut fx, 0.0);
    // Section top at 800, "top 75%" starts at 800 - 600 = 200.
    ctx.on_scroll(&mut fx.tree, viewport(0.0));
    let before = card_styles(&fx);
    ctx.on_scroll(&mut fx.tree, viewport(200.0));
    assert_eq!(card_styles(&fx), before);
    assert_eq!(before[0].opacity, Some(0.0));
    assert_eq!(before[0].translate_y, Some(40.0));

    // End is "bottom bottom": 800 + 1600 - 800 = 1600.
    ctx.on_scroll(&mut fx.tree, viewport(1600.0));
    let end = card_styles(&fx);
    ctx.on_scroll(&mut fx.tree, viewport(3000.0));
    assert_eq!(card_styles(&fx), end);
    assert!(end
        .iter()
        .all(|s| (s.resolved_opacity() - 1.0).abs() < 1e-4));
}

#[test]
fn test_smoothed_scrub_matches_immediate_once_settled() {
    let mut smooth = fixture();
    let mut direct = fixture();
    let mut ctx_smooth = scrubbed_cards(&mut smooth, 1.2);
    let mut ctx_direct = scrubbed_cards(&mut direct, 0.0);

    ctx_smooth.on_scroll(&mut smooth.tree, viewport(0.0));
    ctx_smooth.on_scroll(&mut smooth.tree, viewport(1000.0));
    ctx_smooth.on_frame(&mut smooth.tree, 0.1);
    ctx_smooth.on_scroll(&mut smooth.tree, viewport(800.0));
    for _ in 0..120 {
        ctx_smooth.on_frame(&mut smooth.tree, 1.0 / 60.0);
    }
    ctx_direct.on_scroll(&mut direct.tree, viewport(800.0));

    assert_eq!(card_styles(&smooth), card_styles(&direct));
}

#[test]
fn test_word_reveal_keeps_text() {
    let mut fx = fixture();
    let original = fx.tree.text(fx.paragraph).unwrap().to_string();
    let expected = original.split(' ').count();

    let mut ctx = AnimationContext::new("about", fx.section);
    let words = ctx.split_words(&mut fx.tree, fx.paragraph, "word").unwrap();
    assert_eq!(words.len(), expected);

    let texts: Vec<&str> = words.iter().filter_map(|w| fx.tree.text(*w)).collect();
    assert_eq!(rejoin_words(&texts), original);

    let timeline = Timeline::new().with(
        Tween::from_to(words, StyleProps::opacity(0.2), StyleProps::opacity(1.0))
            .stagger(0.03)
            .ease(Easing::Linear),
        Position::At(0.0),
    );
    let trigger = ScrollTrigger::parse(fx.paragraph, "top 75%", "bottom 60%")
        .unwrap()
        .scrub(1.0);
    ctx.add(&mut fx.tree, "words", timeline, Some(trigger))
        .unwrap();
    ctx.on_scroll(&mut fx.tree, viewport(0.0));
    let first = fx.tree.query_first(fx.paragraph, "word").unwrap();
    assert_eq!(fx.tree.style(first).unwrap().opacity, Some(0.2));

    ctx.revert(&mut fx.tree);
    assert_eq!(fx.tree.text(fx.paragraph), Some(original.as_str()));
    assert!(fx.tree.query(fx.paragraph, "word").is_empty());
}

#[test]
fn test_typing_label_endpoints() {
    let mut fx = fixture();
    let label = fx.cards[0];
    let mut timeline = Timeline::new().with(
        Tween::typing(label, "SCROLL").duration(0.8),
        Position::At(0.0),
    );
    timeline.bind(&fx.tree);

    timeline.set_progress(0.0);
    timeline.render(&mut fx.tree);
    assert_eq!(fx.tree.text(label), Some(""));

    timeline.set_progress(1.0);
    timeline.render(&mut fx.tree);
    assert_eq!(fx.tree.text(label), Some("SCROLL"));
}

#[test]
fn test_scrubbed_typing_follows_scroll() {
    let mut fx = fixture();
    let label = fx.cards[1];
    let mut ctx = AnimationContext::new("about", fx.section);
    let timeline = Timeline::new().with(
        Tween::typing(label, "FULL STACK")
            .initial_text("_")
            .ease(Easing::Linear),
        Position::At(0.0),
    );
    // Card 1 spans 1000..1200; "top bottom" -> 200, "top top" -> 1000.
    let trigger = ScrollTrigger::parse(label, "top bottom", "top top").unwrap();
    ctx.add(&mut fx.tree, "typing", timeline, Some(trigger))
        .unwrap();

    ctx.on_scroll(&mut fx.tree, viewport(0.0));
    assert_eq!(fx.tree.text(label), Some("_"));
    ctx.on_scroll(&mut fx.tree, viewport(600.0));
    assert_eq!(fx.tree.text(label), Some("FULL "));
    ctx.on_scroll(&mut fx.tree, viewport(1000.0));
    assert_eq!(fx.tree.text(label), Some("FULL STACK"));
    ctx.on_scroll(&mut fx.tree, viewport(0.0));
    assert_eq!(fx.tree.text(label), Some("_"));
}

#[test]
fn test_released_context_ignores_events() {
    let mut fx = fixture();
    let mut dispatcher = EventDispatcher::new();
    let ctx = scrubbed_cards(&mut fx, 0.0);
    let handle = ContextHandle::attach(ctx, &mut dispatcher);

    let scroll = |y: f32| {
        Event::new(
            event_types::SCROLL,
            EventData::Scroll {
                viewport: viewport(y),
                delta_y: 0.0,
            },
            0,
        )
    };
    dispatcher.dispatch(&mut scroll(900.0), &mut fx.tree);
    assert!(fx.tree.style(fx.cards[0]).unwrap().opacity.is_some());

    handle.release(&mut dispatcher, &mut fx.tree);
    assert!(card_styles(&fx).iter().all(StyleProps::is_empty));

    let before = fx.tree.mutation_count();
    for y in [1000.0, 200.0, 1500.0] {
        dispatcher.dispatch(&mut scroll(y), &mut fx.tree);
    }
    let mut frame = Event::new(
        event_types::FRAME,
        EventData::Frame {
            dt_ms: 16.0,
            viewport: viewport(1500.0),
        },
        1,
    );
    dispatcher.dispatch(&mut frame, &mut fx.tree);
    assert_eq!(fx.tree.mutation_count(), before);
}
