//! Conformance tests for [`Traverse`] providers.
//!
//! These tests verify that a provider honours the traversal contract the
//! combinator layer relies on. To use them with a custom provider, call
//! [`conformance`] with the provider, a sample of at least two distinct
//! elements, and a function that turns a vector of elements into a cursor.

use crate::{Traverse, TraverseResult};
use std::fmt::Debug;

/// Run all conformance tests against a provider.
///
/// This is the main entry point for testing a custom provider.
pub async fn conformance<P, F>(
    provider: &P,
    sample: Vec<P::Item>,
    mut make_cursor: F,
) -> TraverseResult<()>
where
    P: Traverse,
    P::Item: Clone + PartialEq + Debug,
    F: FnMut(Vec<P::Item>) -> P::Cursor,
{
    assert!(sample.len() >= 2, "conformance needs at least two elements");

    test_for_each_visits_in_order(provider, make_cursor(sample.clone()), &sample).await?;
    test_empty_cursor(provider, &mut make_cursor).await?;
    test_while_stops_on_false(provider, make_cursor(sample.clone()), &sample).await?;
    test_while_exhausts_cursor(provider, make_cursor(sample.clone()), &sample).await?;
    Ok(())
}

/// Test that `for_each_async` visits every element once, in cursor order.
pub async fn test_for_each_visits_in_order<P>(
    provider: &P,
    cursor: P::Cursor,
    expected: &[P::Item],
) -> TraverseResult<()>
where
    P: Traverse,
    P::Item: PartialEq + Debug,
{
    let mut seen = Vec::new();
    let visited = provider.for_each_async(cursor, |item| seen.push(item)).await?;
    assert_eq!(visited, expected.len());
    assert_eq!(seen, expected);
    Ok(())
}

/// Test that a present but empty cursor resolves with zero visits for both
/// primitives.
pub async fn test_empty_cursor<P, F>(provider: &P, make_cursor: &mut F) -> TraverseResult<()>
where
    P: Traverse,
    F: FnMut(Vec<P::Item>) -> P::Cursor,
{
    let mut calls = 0;
    assert_eq!(provider.for_each_async(make_cursor(vec![]), |_| calls += 1).await?, 0);
    assert_eq!(
        provider
            .while_async(make_cursor(vec![]), |_| {
                calls += 1;
                true
            })
            .await?,
        0
    );
    assert_eq!(calls, 0);
    Ok(())
}

/// Test that `while_async` stops on the first visit that returns `false`.
pub async fn test_while_stops_on_false<P>(
    provider: &P,
    cursor: P::Cursor,
    expected: &[P::Item],
) -> TraverseResult<()>
where
    P: Traverse,
    P::Item: PartialEq + Debug,
{
    // Stop on the second element so at least one element stays unvisited
    // whenever the sample has three or more.
    let mut seen = Vec::new();
    let visited = provider
        .while_async(cursor, |item| {
            seen.push(item);
            seen.len() < 2
        })
        .await?;
    assert_eq!(visited, 2);
    assert_eq!(seen, &expected[..2]);
    Ok(())
}

/// Test that `while_async` visits everything when the visitor never stops.
pub async fn test_while_exhausts_cursor<P>(
    provider: &P,
    cursor: P::Cursor,
    expected: &[P::Item],
) -> TraverseResult<()>
where
    P: Traverse,
    P::Item: PartialEq + Debug,
{
    let mut seen = Vec::new();
    let visited = provider
        .while_async(cursor, |item| {
            seen.push(item);
            true
        })
        .await?;
    assert_eq!(visited, expected.len());
    assert_eq!(seen, expected);
    Ok(())
}
