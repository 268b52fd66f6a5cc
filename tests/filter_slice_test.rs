//! Batch-mode dispatch: exactly one callback invocation with every match.

use std::any::Any;
use std::fmt::Debug;

use tola_filter::prelude::*;
use tola_filter::dispatch;

#[capability]
trait Mock {
    fn id(&self) -> u32;
}

#[derive(Debug, Element)]
#[element(Mock, Debug)]
struct MockA(u32);

impl Mock for MockA {
    fn id(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Element)]
#[element(Debug)]
struct PlainStruct;

#[derive(Debug)]
struct TooMany(usize);

impl std::fmt::Display for TooMany {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} mocks is too many", self.0)
    }
}

impl std::error::Error for TooMany {}

#[test]
fn test_batch_of_matching_elements() {
    let items = collection![MockA(1), PlainStruct];
    let mut batches = Vec::new();
    let result = items.filter_slice::<dyn Mock, _>(|mocks| {
        batches.push(mocks.iter().map(|m| m.id()).collect::<Vec<_>>());
        Ok::<(), TooMany>(())
    });
    assert!(result.is_ok());
    assert_eq!(batches, [vec![1]]);
}

#[test]
fn test_empty_collection_invokes_once() {
    let items = Collection::new();
    let mut sizes = Vec::new();
    items.filter_slice::<dyn Any, _>(|all| sizes.push(all.len())).unwrap();
    assert_eq!(sizes, [0]);
}

#[test]
fn test_no_match_invokes_once_with_empty_batch() {
    let items = collection![PlainStruct, Nil, PlainStruct];
    let mut sizes = Vec::new();
    items.filter_slice::<dyn Mock, _>(|mocks| sizes.push(mocks.len())).unwrap();
    assert_eq!(sizes, [0]);
}

#[test]
fn test_batch_keeps_order_and_skips_nil() {
    let items = collection![MockA(3), Nil, PlainStruct, MockA(1), MockA(2)];
    let mut ids = Vec::new();
    items
        .filter_slice::<dyn Mock, _>(|mocks| ids.extend(mocks.iter().map(|m| m.id())))
        .unwrap();
    assert_eq!(ids, [3, 1, 2]);
}

#[test]
fn test_any_batch_holds_every_present_value() {
    let items = collection![MockA(1), Nil, PlainStruct, 5_u8];
    let mut count = 0;
    items.filter_slice::<dyn Any, _>(|all| count = all.len()).unwrap();
    assert_eq!(count, 3);
}

#[test]
fn test_batch_of_two_capable_types() {
    let items = collection![MockA(1), PlainStruct, 5_u8, ()];
    let mut rendered = Vec::new();
    items
        .filter_slice::<dyn Debug, _>(|all| rendered = all.iter().map(|v| format!("{v:?}")).collect())
        .unwrap();
    assert_eq!(rendered, ["MockA(1)", "PlainStruct", "5", "()"]);
}

#[test]
fn test_batch_error_relayed() {
    let items = collection![MockA(1), MockA(2)];
    let err = items
        .filter_slice::<dyn Mock, _>(|mocks| match mocks.len() {
            0 | 1 => Ok(()),
            n => Err(TooMany(n)),
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "2 mocks is too many");
    assert!(err.callback_error().is_some_and(|e| e.is::<TooMany>()));
}

#[test]
fn test_free_function() {
    let items = collection![MockA(9)];
    let mut ids = Vec::new();
    dispatch::filter_slice::<dyn Mock, _>(&items, |mocks| ids = mocks.iter().map(|m| m.id()).collect())
        .unwrap();
    assert_eq!(ids, [9]);
}

#[test]
fn test_with_empty_options() {
    let items = collection![MockA(4), PlainStruct, MockA(5)];
    let mut ids = Vec::new();
    items
        .filter_slice_with::<dyn Mock, _>(|mocks| ids.extend(mocks.iter().map(|m| m.id())), &[])
        .unwrap();
    items.filter_with::<dyn Mock, _>(|m| ids.push(m.id()), &[]).unwrap();
    assert_eq!(ids, [4, 5, 4, 5]);
}
