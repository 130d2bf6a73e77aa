//! Exhaustive pagination over a listing API.

use async_stream::try_stream;
use futures::{Stream, TryStreamExt};
use kl_error::{ListingError, Result};
use kl_traits::InventorySource;
use kl_types::{ListPage, Ownership, ResourceId};
use std::collections::HashSet;
use tracing::{debug, trace, warn};

use crate::config::ListOptions;

/// List every resource identifier exposed by `source`.
///
/// Returns a stream of [`ResourceId`]s, following continuation tokens until
/// the listing API reports no more pages. A token is never requested twice,
/// and a page that claims more results without a token is an error.
///
/// Any listing failure ends the stream with a [`ListingError`], except an
/// access denial on the very first page: that is logged once and ends the
/// stream without error, since the caller simply cannot see any resources.
///
/// With `options.owned_only`, each listed item is described and dropped if
/// it is managed by another party. Items whose lookup fails are kept.
///
/// # Example
///
/// ```ignore
/// use futures::{StreamExt, pin_mut};
///
/// let stream = list_resources(&source, &options);
/// pin_mut!(stream);
///
/// while let Some(result) = stream.next().await {
///     println!("Found: {}", result?);
/// }
/// ```
pub fn list_resources<'a, S>(
    source: &'a S,
    options: &'a ListOptions,
) -> impl Stream<Item = Result<ResourceId>> + 'a
where
    S: InventorySource + ?Sized,
{
    try_stream! {
        let mut token: Option<String> = None;
        let mut issued: HashSet<String> = HashSet::new();

        loop {
            let first = token.is_none();
            let page = match fetch_page(source, token.as_deref(), first, options).await? {
                Some(page) => page,
                None => break,
            };

            trace!(items = page.items.len(), has_more = page.has_more, "Received page");

            for id in page.items {
                if options.owned_only && !is_owned(source, &id).await {
                    debug!(id = %id, "Skipping foreign-managed resource");
                    continue;
                }
                yield id;
            }

            if !page.has_more {
                break;
            }

            let next = page.next_token.ok_or(ListingError::MissingToken)?;
            record_token(&mut issued, &next)?;
            token = Some(next);
        }
    }
}

/// Collect every identifier from [`list_resources`].
pub async fn list_all<S>(source: &S, options: &ListOptions) -> Result<Vec<ResourceId>>
where
    S: InventorySource + ?Sized,
{
    list_resources(source, options).try_collect().await
}

/// Fetch one page, mapping a first-page denial to `None`.
async fn fetch_page<S>(
    source: &S,
    token: Option<&str>,
    first: bool,
    options: &ListOptions,
) -> Result<Option<ListPage>>
where
    S: InventorySource + ?Sized,
{
    match source.list_page(token).await {
        Ok(page) => Ok(Some(page)),
        Err(e) if first && options.classifier.is_denied(&e) => {
            warn!(
                kind = %source.kind(),
                error = %e,
                "Not authorized to list resources, skipping"
            );
            Ok(None)
        }
        Err(e) => Err(ListingError::Request(e).into()),
    }
}

fn record_token(issued: &mut HashSet<String>, token: &str) -> Result<()> {
    if !issued.insert(token.to_string()) {
        return Err(ListingError::RepeatedToken(token.to_string()).into());
    }
    Ok(())
}

async fn is_owned<S>(source: &S, id: &ResourceId) -> bool
where
    S: InventorySource + ?Sized,
{
    match source.describe(id).await {
        Ok(detail) => detail.ownership == Ownership::Account,
        Err(e) => {
            // Failure may itself mean restricted access; surface it later
            debug!(id = %id, error = %e, "Ownership lookup failed, keeping resource");
            true
        }
    }
}
