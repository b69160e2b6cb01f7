use super::*;
use crate::presence::Signal;

#[test]
fn open_in_auto_hide_schedules_a_delayed_hide() {
    // Arrange
    let mut h = opened(Edge::Bottom, BarMode::AutoHide);

    // Act
    let before_delay = h.run_for(399);
    let after = h.run_for(301);

    // Assert: nothing moves during the 400 ms delay, then the bar
    // retracts to thickness minus margin.
    assert!(translations(&before_delay).is_empty());
    assert_eq!(translations(&after).last(), Some(&38));
    assert_eq!(h.bar.auto_hide_offset(), 38);
}

#[test]
fn offsets_are_monotonic_while_hiding() {
    let mut h = opened(Edge::Bottom, BarMode::AutoHide);

    let offsets = translations(&h.run_for(1000));

    assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn top_edge_hides_upward() {
    let mut h = opened(Edge::Top, BarMode::AutoHide);

    h.run_for(1000);

    assert_eq!(h.bar.auto_hide_offset(), -38);
}

#[test]
fn vertical_edges_follow_flow_direction() {
    // Arrange
    let mut ltr = opened(Edge::Right, BarMode::AutoHide);
    let mut rtl = Harness::new(
        BarOptions {
            flow_direction: FlowDirection::RightToLeft,
            ..options(Edge::Right, BarMode::AutoHide)
        },
        primary_screen(),
        false,
    );
    rtl.bar.open(HWND, 1.0);

    // Act
    ltr.run_for(1000);
    rtl.run_for(1000);

    // Assert
    assert_eq!(ltr.bar.auto_hide_offset(), 38);
    assert_eq!(rtl.bar.auto_hide_offset(), -38);
}

#[test]
fn offset_scales_with_dpi() {
    let mut h = Harness::new(options(Edge::Bottom, BarMode::AutoHide), primary_screen(), false);
    h.bar.open(HWND, 1.5);

    h.run_for(1000);

    assert_eq!(h.bar.auto_hide_offset(), 57);
}

#[test]
fn pointer_inside_blocks_hiding() {
    // Arrange
    let mut h = opened(Edge::Bottom, BarMode::AutoHide);

    // Act
    let entered = h.bar.set_presence(Signal::Pointer, true);
    let effects = h.run_for(2000);

    // Assert
    assert!(entered.is_empty());
    assert!(translations(&effects).is_empty());
    assert_eq!(h.bar.auto_hide_offset(), 0);
    assert!(!h.bar.allow_auto_hide());
}

#[test]
fn pointer_leaving_schedules_exactly_one_hide() {
    // Arrange
    let mut h = opened(Edge::Bottom, BarMode::AutoHide);
    h.bar.set_presence(Signal::Pointer, true);
    h.run_for(500);

    // Act
    h.bar.set_presence(Signal::Pointer, false);
    let repeated = h.bar.set_presence(Signal::Pointer, false);
    let before_delay = h.run_for(399);
    let after = h.run_for(400);

    // Assert
    assert!(repeated.is_empty());
    assert!(translations(&before_delay).is_empty());
    assert_eq!(translations(&after).last(), Some(&38));
    assert_eq!(h.run_for(1000), Vec::new());
}

#[test]
fn pointer_entering_reveals_a_hidden_bar() {
    // Arrange
    let mut h = opened(Edge::Bottom, BarMode::AutoHide);
    h.run_for(1000);

    // Act
    h.bar.set_presence(Signal::Pointer, true);
    let effects = h.run_for(150);

    // Assert
    assert_eq!(translations(&effects).last(), Some(&0));
    assert_eq!(h.bar.auto_hide_offset(), 0);
}

#[test]
fn show_interrupting_a_hide_starts_from_current_offset() {
    // Arrange: let the hide run half way.
    let mut h = opened(Edge::Bottom, BarMode::AutoHide);
    h.run_for(400 + 144);
    let midway = h.bar.auto_hide_offset();
    assert!(midway > 0 && midway < 38);

    // Act
    h.bar.set_presence(Signal::Pointer, true);
    let offsets = translations(&h.run_for(150));

    // Assert: the reveal never jumps past where the hide left off.
    assert!(offsets.iter().all(|&o| o <= midway));
    assert_eq!(offsets.last(), Some(&0));
}

#[test]
fn drag_and_context_menu_also_block_hiding() {
    let mut h = opened(Edge::Bottom, BarMode::AutoHide);

    h.bar.set_presence(Signal::Drag, true);
    assert!(!h.bar.allow_auto_hide());

    h.bar.drop_received();
    assert!(h.bar.allow_auto_hide());

    h.bar.context_menu_opening(3, 3);
    assert!(h.bar.presence().context_menu_open);
    assert!(!h.bar.allow_auto_hide());
}

#[test]
fn context_menu_outside_content_menu_is_ignored() {
    let mut h = opened(Edge::Bottom, BarMode::AutoHide);

    let effects = h.bar.context_menu_opening(50, 3);

    assert!(effects.is_empty());
    assert!(!h.bar.presence().context_menu_open);
}

#[test]
fn docked_bar_never_hides() {
    let mut h = opened(Edge::Bottom, BarMode::Docked);

    h.bar.set_presence(Signal::Pointer, true);
    h.bar.set_presence(Signal::Pointer, false);
    let effects = h.run_for(2000);

    assert!(translations(&effects).is_empty());
    assert_eq!(h.bar.auto_hide_offset(), 0);
}

#[test]
fn bar_without_content_does_not_animate() {
    // Arrange
    let ctx_source = Harness::new(options(Edge::Bottom, BarMode::AutoHide), primary_screen(), false);
    let ctx = ctx_source.bar.ctx.clone();
    let mut bar = Bar::new(options(Edge::Bottom, BarMode::AutoHide), primary_screen(), ctx);

    // Act
    bar.open(HWND, 1.0);
    ctx_source.clock.advance(1000);
    let effects = bar.tick();

    // Assert
    assert!(!bar.has_content());
    assert!(effects.is_empty());
    assert_eq!(bar.auto_hide_offset(), 0);
}

// -- peek --

#[test]
fn peek_shows_immediately_then_hides_once_after_duration() {
    // Arrange: start fully hidden.
    let mut h = opened(Edge::Bottom, BarMode::AutoHide);
    h.run_for(1000);

    // Act
    h.bar.peek(1000);
    let shown = h.run_for(999);
    let offset_before_expiry = h.bar.auto_hide_offset();
    let hidden = h.run_for(320);

    // Assert
    assert_eq!(translations(&shown).last(), Some(&0));
    assert_eq!(offset_before_expiry, 0);
    assert!(translations(&hidden).windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(h.bar.auto_hide_offset(), 38);
    assert!(!h.bar.peek_active());
    assert_eq!(h.run_for(2000), Vec::new());
}

#[test]
fn peek_blocks_hiding_while_active() {
    let mut h = opened(Edge::Bottom, BarMode::AutoHide);

    h.bar.peek(1000);

    assert!(h.bar.peek_active());
    assert!(!h.bar.allow_auto_hide());
}

#[test]
fn new_peek_replaces_previous_one() {
    // Arrange
    let mut h = opened(Edge::Bottom, BarMode::AutoHide);
    h.bar.peek(1000);
    h.run_for(800);

    // Act
    h.bar.peek(1000);
    h.run_for(500);

    // Assert: the first peek's expiry no longer hides the bar.
    assert!(h.bar.peek_active());
    assert_eq!(h.bar.auto_hide_offset(), 0);
}

#[test]
fn peek_expiry_keeps_bar_shown_while_pointer_inside() {
    let mut h = opened(Edge::Bottom, BarMode::AutoHide);
    h.bar.peek(500);
    h.bar.set_presence(Signal::Pointer, true);

    h.run_for(2000);

    assert_eq!(h.bar.auto_hide_offset(), 0);
}

#[test]
fn peek_outside_auto_hide_does_nothing() {
    let mut h = opened(Edge::Bottom, BarMode::Docked);

    let effects = h.bar.peek(1000);

    assert!(effects.is_empty());
    assert!(!h.bar.peek_active());
}

// -- blur --

#[test]
fn blur_is_dropped_before_hiding_and_restored_after_showing() {
    // Arrange
    let mut h = opened(Edge::Bottom, BarMode::AutoHide);
    let deferred = h.bar.set_blur(true);

    // Act
    let hiding = h.run_for(1000);
    h.bar.set_presence(Signal::Pointer, true);
    let showing = h.run_for(200);

    // Assert
    assert!(deferred.is_empty());
    assert!(h.bar.blur_enabled());

    let first_blur = hiding.iter().position(|e| *e == Effect::SetBlur(false));
    let first_move = hiding
        .iter()
        .position(|e| matches!(e, Effect::Translate { .. }));
    assert!(first_blur.is_some());
    assert!(first_blur < first_move);

    let n = showing.len();
    assert!(n >= 2);
    assert_eq!(showing[n - 1], Effect::SetBlur(true));
    assert!(matches!(showing[n - 2], Effect::Translate { offset: 0, .. }));
}

#[test]
fn blur_applies_at_once_when_bar_is_shown() {
    let mut h = opened(Edge::Bottom, BarMode::Docked);

    assert_eq!(h.bar.set_blur(true), vec![Effect::SetBlur(true)]);
    assert_eq!(h.bar.set_blur(true), Vec::new());
    assert_eq!(h.bar.set_blur(false), vec![Effect::SetBlur(false)]);
}

#[test]
fn blur_needs_transparency() {
    let mut h = Harness::new(
        BarOptions {
            allows_transparency: false,
            ..BarOptions::default()
        },
        primary_screen(),
        false,
    );
    h.bar.open(HWND, 1.0);

    assert!(h.bar.set_blur(true).is_empty());
    assert!(!h.bar.blur_enabled());
}
