use companion_shell::geometry::WindowBounds;
use companion_shell::owner::WindowCommand;
use companion_shell::placement::{PlacementBootstrapper, DEFAULT_PLACEMENT_INSET};

use mock_owner::MockOwner;

#[test]
fn places_the_window_inset_from_the_bottom_right_corner() {
    let owner = MockOwner::new(WindowBounds::default())
        .with_display(WindowBounds::new(0, 0, 1920, 1080));
    let mut placement = PlacementBootstrapper::new(DEFAULT_PLACEMENT_INSET);

    placement.begin(&owner);
    placement.poll(&owner);

    assert_eq!(
        owner.commands(),
        vec![WindowCommand::SetPosition { x: 1270, y: 480 }]
    );
    assert!(placement.is_settled());
}

#[test]
fn placement_accounts_for_the_display_origin() {
    let owner = MockOwner::new(WindowBounds::default())
        .with_display(WindowBounds::new(1920, 200, 1280, 1024));
    let mut placement = PlacementBootstrapper::new((650, 600));

    placement.begin(&owner);
    placement.poll(&owner);

    assert_eq!(
        owner.commands(),
        vec![WindowCommand::SetPosition { x: 2550, y: 624 }]
    );
}

#[test]
fn placement_runs_exactly_once() {
    let owner = MockOwner::new(WindowBounds::default())
        .with_display(WindowBounds::new(0, 0, 1920, 1080));
    let mut placement = PlacementBootstrapper::new(DEFAULT_PLACEMENT_INSET);

    for _ in 0..4 {
        placement.begin(&owner);
        placement.poll(&owner);
    }

    assert_eq!(owner.commands().len(), 1);
    assert_eq!(owner.display_queries(), 1);
}

#[test]
fn a_failed_display_query_is_not_fatal() {
    let owner = MockOwner::new(WindowBounds::default());
    let mut placement = PlacementBootstrapper::new(DEFAULT_PLACEMENT_INSET);

    placement.begin(&owner);
    placement.poll(&owner);

    assert!(owner.commands().is_empty());
    assert!(placement.is_settled());

    // No retry once the step has been skipped.
    placement.begin(&owner);
    placement.poll(&owner);
    assert_eq!(owner.display_queries(), 1);
}
