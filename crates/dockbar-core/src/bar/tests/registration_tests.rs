use super::*;

fn registered_sizes(h: &Harness) -> Vec<BarSize> {
    h.authority
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::Register { size, .. } => Some(size),
            _ => None,
        })
        .collect()
}

#[test]
fn opening_docked_registers_once() {
    let h = opened(Edge::Bottom, BarMode::Docked);

    assert!(h.bar.is_registered());
    assert_eq!(h.bar.callback_id(), Some(CALLBACK_ID));
    assert_eq!(h.authority.count(|c| matches!(c, Call::Register { .. })), 1);
}

#[test]
fn opening_docked_takes_the_assigned_position() {
    // Arrange
    let mut h = Harness::new(options(Edge::Bottom, BarMode::Docked), primary_screen(), false);
    let assigned = Rect::new(0, 1030, 1920, 50);
    h.authority.assigned.set(assigned);

    // Act
    let effects = h.bar.open(HWND, 1.0);

    // Assert
    assert_eq!(
        h.authority.count(|c| matches!(c, Call::SetPosition { .. })),
        1
    );
    assert_eq!(h.bar.last_assigned(), Some(assigned));
    assert!(effects.contains(&Effect::move_to(assigned)));
}

#[test]
fn opening_docked_as_shell_keeps_resolved_position() {
    // Arrange
    let mut h = Harness::new(options(Edge::Bottom, BarMode::Docked), primary_screen(), true);

    // Act
    h.bar.open(HWND, 1.0);

    // Assert
    assert!(h.bar.is_registered());
    assert_eq!(
        h.authority.count(|c| matches!(c, Call::SetPosition { .. })),
        0
    );
    assert_eq!(h.bar.last_assigned(), None);
}

#[test]
fn floating_to_docked_takes_the_assigned_position() {
    // Arrange
    let mut h = opened(Edge::Bottom, BarMode::Floating);
    let assigned = Rect::new(0, 1030, 1920, 50);
    h.authority.assigned.set(assigned);

    // Act
    let effects = h.bar.set_mode(BarMode::Docked);

    // Assert
    assert_eq!(
        h.authority.count(|c| matches!(c, Call::SetPosition { .. })),
        1
    );
    assert_eq!(h.bar.last_assigned(), Some(assigned));
    assert_eq!(effects, vec![Effect::move_to(assigned)]);
}

#[test]
fn opening_floating_registers_nothing() {
    let h = opened(Edge::Bottom, BarMode::Floating);

    assert!(!h.bar.is_registered());
    assert_eq!(h.bar.callback_id(), None);
    assert!(h.authority.calls().is_empty());
}

#[test]
fn docked_floating_docked_restores_registration() {
    // Arrange
    let mut h = opened(Edge::Left, BarMode::Docked);

    // Act
    h.bar.set_mode(BarMode::Floating);
    let released = !h.bar.is_registered();
    h.bar.set_mode(BarMode::Docked);

    // Assert
    assert!(released);
    assert!(h.bar.is_registered());
    let sizes = registered_sizes(&h);
    assert_eq!(sizes.len(), 2);
    assert_eq!(sizes[0], sizes[1]);
    assert_eq!(sizes[1].width, 40.0);
}

#[test]
fn docked_to_auto_hide_releases_edge_then_registers_auto_hide() {
    // Arrange
    let mut h = opened(Edge::Bottom, BarMode::Docked);
    h.authority.clear_calls();

    // Act
    h.bar.set_mode(BarMode::AutoHide);
    h.run_for(1000);

    // Assert
    assert_eq!(
        h.authority.calls(),
        vec![
            Call::Unregister { handle: HWND },
            Call::RegisterAutoHide { edge: Edge::Bottom },
        ]
    );
    assert_eq!(h.bar.auto_hide_offset(), 38);
}

#[test]
fn auto_hide_to_docked_registers_then_shows_immediately() {
    // Arrange
    let mut h = opened(Edge::Bottom, BarMode::AutoHide);
    h.run_for(1000);
    h.authority.clear_calls();

    // Act
    h.bar.set_mode(BarMode::Docked);
    h.run_for(150);

    // Assert
    assert_eq!(
        h.authority.calls(),
        vec![
            Call::Register {
                handle: HWND,
                size: BarSize {
                    width: 1920.0,
                    height: 40.0,
                },
            },
            Call::SetPosition { handle: HWND },
            Call::UnregisterAutoHide { edge: Edge::Bottom },
        ]
    );
    assert_eq!(h.bar.auto_hide_offset(), 0);
}

#[test]
fn leaving_auto_hide_cancels_peek() {
    let mut h = opened(Edge::Bottom, BarMode::AutoHide);
    h.bar.peek(1000);

    h.bar.set_mode(BarMode::Floating);

    assert!(!h.bar.peek_active());
}

#[test]
fn setting_same_mode_is_a_no_op() {
    let mut h = opened(Edge::Bottom, BarMode::Docked);
    h.authority.clear_calls();

    let effects = h.bar.set_mode(BarMode::Docked);

    assert!(effects.is_empty());
    assert!(h.authority.calls().is_empty());
}

#[test]
fn mode_change_before_open_only_records_mode() {
    // Arrange
    let mut h = Harness::new(options(Edge::Bottom, BarMode::Docked), primary_screen(), false);

    // Act
    h.bar.set_mode(BarMode::AutoHide);
    h.bar.open(HWND, 1.0);

    // Assert
    assert_eq!(h.bar.mode(), BarMode::AutoHide);
    assert_eq!(
        h.authority.calls(),
        vec![Call::RegisterAutoHide { edge: Edge::Bottom }]
    );
}
