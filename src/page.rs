use std::future::Future;

/// One page of a cursor-based listing. `next` is `Some` exactly when the
/// server reported the response as truncated.
#[derive(Debug, Clone)]
pub struct Page<T, C> {
    pub items: Vec<T>,
    pub next: Option<C>,
}

/// Drains a paginated listing to completion, returning the concatenation
/// of all pages in server order. Issues one request per page, carrying the
/// continuation cursor forward until a page comes back without one.
/// Termination rests on the server's truncation contract; there is no
/// cycle detection here.
pub async fn fetch_all<T, C, F, Fut>(mut fetch_page: F) -> anyhow::Result<Vec<T>>
where
    F: FnMut(Option<C>) -> Fut,
    Fut: Future<Output = anyhow::Result<Page<T, C>>>,
{
    let mut items = Vec::new();
    let mut cursor = None;

    loop {
        let page = fetch_page(cursor).await?;
        items.extend(page.items);
        match page.next {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    Ok(items)
}
