//! Mediator channel semantics.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use medigrid_ui::mediator::{ActionMediator, Channel};
use medigrid_ui::prelude::Record;

#[test]
fn subscribe_once_sees_exactly_one_of_three_publishes() {
    let mediator: ActionMediator<Record> = ActionMediator::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&hits);
    mediator
        .edit
        .subscribe_once(move |_| {
            counted.fetch_add(1, Ordering::SeqCst);
        })
        .detach();

    for id in 1..=3i64 {
        mediator.edit.publish(&Record::new().set("id", id));
    }
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn dropping_the_subscription_unsubscribes() {
    let channel: Channel<()> = Channel::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&hits);
    let subscription = channel.subscribe(move |_| {
        counted.fetch_add(1, Ordering::SeqCst);
    });

    channel.publish(&());
    drop(subscription);
    channel.publish(&());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(channel.subscriber_count(), 0);
}

#[test]
fn publishes_are_not_buffered_for_late_subscribers() {
    let mediator: ActionMediator<Record> = ActionMediator::new();
    mediator.add_new();

    let hits = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&hits);
    let _subscription = mediator.add.subscribe(move |_| {
        counted.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    mediator.add_new();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn bulk_intents_carry_the_checkbox_selection() {
    let mediator: ActionMediator<Record> = ActionMediator::new();
    mediator.checkbox_selected.set(vec![3, 1, 4]);

    let seen: Arc<Mutex<Vec<Vec<i64>>>> = Arc::default();

    let captured = Arc::clone(&seen);
    mediator
        .approve
        .subscribe(move |ids| captured.lock().unwrap().push(ids.clone()))
        .detach();
    let captured = Arc::clone(&seen);
    mediator
        .back_to_sales_confirm
        .subscribe(move |ids| captured.lock().unwrap().push(ids.clone()))
        .detach();

    mediator.approve_selected();
    mediator.back_to_sales_selected();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.as_slice(), &[vec![3, 1, 4], vec![3, 1, 4]]);
}

#[test]
fn data_replace_delivers_the_fresh_row() {
    let mediator: ActionMediator<Record> = ActionMediator::new();
    let seen: Arc<Mutex<Vec<i64>>> = Arc::default();
    let captured = Arc::clone(&seen);
    mediator
        .data_replace
        .subscribe(move |row: &Record| {
            captured.lock().unwrap().push(row.id().unwrap_or_default());
        })
        .detach();

    mediator.data_replace.publish(&Record::new().set("id", 11i64));
    mediator.data_replace.publish(&Record::new().set("id", 12i64));
    assert_eq!(*seen.lock().unwrap(), vec![11, 12]);
}

#[test]
fn every_subscriber_hears_a_publish() {
    let channel: Channel<Vec<i64>> = Channel::new();
    let hits = Arc::new(AtomicUsize::new(0));
    for _ in 0..3 {
        let counted = Arc::clone(&hits);
        channel
            .subscribe(move |ids| {
                counted.fetch_add(ids.len(), Ordering::SeqCst);
            })
            .detach();
    }

    channel.publish(&vec![7, 8]);
    assert_eq!(hits.load(Ordering::SeqCst), 6);
}
