use super::*;

#[test]
fn sidebar_starts_expanded() {
    let sidebar = Sidebar::new();
    assert!(!sidebar.collapsed());
}

#[test]
fn toggle_is_an_involution() {
    let sidebar = Sidebar::new();
    assert!(sidebar.toggle());
    assert!(sidebar.collapsed());
    assert!(!sidebar.toggle());
    assert!(!sidebar.collapsed());
}

#[test]
fn set_collapsed_is_absolute() {
    let sidebar = Sidebar::new();
    sidebar.set_collapsed(true);
    assert!(sidebar.collapsed());
    sidebar.set_collapsed(true);
    assert!(sidebar.collapsed());
    sidebar.set_collapsed(false);
    assert!(!sidebar.collapsed());
}

#[test]
fn toggle_after_set_flips_from_current_value() {
    let sidebar = Sidebar::new();
    sidebar.set_collapsed(true);
    assert!(!sidebar.toggle());
}

#[test]
fn default_equals_new() {
    assert_eq!(Sidebar::default().collapsed(), Sidebar::new().collapsed());
}
