//! Tab tracking across routes and mediator intents.

use medigrid_ui::mediator::ActionMediator;
use medigrid_ui::prelude::Record;
use medigrid_ui::tabs::{Tab, TabTracker, redirect_route};

#[test]
fn starts_on_the_list_tab() {
    let tracker = TabTracker::new();
    assert_eq!(tracker.current(), Tab::List);
    assert!(!tracker.search_visible());
}

#[test]
fn plist_routes_force_the_plist_tab() {
    let tracker = TabTracker::new();
    tracker.select(Tab::Form);
    tracker.on_route_change("/deliveryOrderPList");
    assert_eq!(tracker.current(), Tab::PList);

    // Non-PList routes leave the tab alone.
    tracker.select(Tab::List);
    tracker.on_route_change("/patientList");
    assert_eq!(tracker.current(), Tab::List);
}

#[test]
fn do_param_only_promotes_the_form_tab() {
    let tracker = TabTracker::new();
    tracker.select(Tab::Form);
    tracker.on_route_change("/patientForm?do=12");
    assert_eq!(tracker.current(), Tab::Edit);

    tracker.select(Tab::Details);
    tracker.on_route_change("/patientForm?do=12");
    assert_eq!(tracker.current(), Tab::Details);
}

#[test]
fn details_intent_forces_the_details_tab() {
    let tracker = TabTracker::new();
    let mediator: ActionMediator<Record> = ActionMediator::new();
    tracker.wire(&mediator);

    mediator.details.publish(&Record::new().set("id", 5i64));
    assert_eq!(tracker.current(), Tab::Details);
}

#[test]
fn search_toggle_flips_the_panel_without_touching_the_tab() {
    let tracker = TabTracker::new();
    let mediator: ActionMediator<Record> = ActionMediator::new();
    tracker.wire(&mediator);
    tracker.select(Tab::PList);

    mediator.toggle_search();
    assert!(tracker.search_visible());
    assert_eq!(tracker.current(), Tab::PList);

    mediator.toggle_search();
    assert!(!tracker.search_visible());
}

#[test]
fn redirect_routes_swap_the_minor_segment() {
    assert_eq!(redirect_route("/orderPList", Tab::Form), "/orderForm");
    assert_eq!(redirect_route("/orderForm", Tab::PList), "/orderPList");
    assert_eq!(redirect_route("/patientList?do=9", Tab::Form), "/patientForm");
    assert_eq!(redirect_route("/patientList", Tab::Details), "/patientDetails");
}
