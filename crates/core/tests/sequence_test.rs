use clinicbook_core::sequence::RequestSequencer;

#[test]
fn test_tokens_increase() {
    let sequencer = RequestSequencer::new();

    let first = sequencer.issue();
    let second = sequencer.issue();

    assert!(second > first);
    assert_eq!(second.value(), first.value() + 1);
}

#[test]
fn test_older_result_is_discarded_after_newer_one() {
    let sequencer = RequestSequencer::new();
    let initial_load = sequencer.issue();
    let refresh = sequencer.issue();

    assert!(sequencer.try_apply(refresh));
    assert!(!sequencer.try_apply(initial_load));
    assert_eq!(sequencer.last_applied(), Some(refresh));
}

#[test]
fn test_in_order_results_are_all_applied() {
    let sequencer = RequestSequencer::new();
    assert_eq!(sequencer.last_applied(), None);

    let first = sequencer.issue();
    assert!(sequencer.try_apply(first));

    let second = sequencer.issue();
    assert!(sequencer.try_apply(second));
    assert!(!sequencer.try_apply(second));
}
