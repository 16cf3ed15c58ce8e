//! List-building fixtures.

use chunkpool_core::{ListError, Rebind};
use chunkpool_list::LinkedList;

/// Push every item to the front of `list`, in iteration order.
///
/// The list ends up holding the items reversed.
pub fn push_front_all<T, A, I>(list: &mut LinkedList<T, A>, items: I) -> Result<(), ListError>
where
    A: Rebind,
    I: IntoIterator<Item = T>,
{
    for item in items {
        list.push_front(item)?;
    }
    Ok(())
}

/// Append every item by chaining `insert_after` from the head.
///
/// `list` must be empty; the list ends up holding the items in order.
pub fn append_all<T, A, I>(list: &mut LinkedList<T, A>, items: I) -> Result<(), ListError>
where
    A: Rebind,
    I: IntoIterator<Item = T>,
{
    let mut pos = list.begin();
    for item in items {
        pos = list.insert_after(pos, item)?;
    }
    Ok(())
}

/// Clone the list's values into a `Vec`, head first.
pub fn collect_values<T: Clone, A: Rebind>(list: &LinkedList<T, A>) -> Vec<T> {
    list.iter().cloned().collect()
}
