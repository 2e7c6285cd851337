use std::{collections::HashMap, hash::Hash};

/// One identity that occurs more than once, with every position it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup<T> {
    pub item: T,
    /// Ascending, 0-based, first occurrence included.
    pub positions: Vec<usize>,
}

impl<T> DuplicateGroup<T> {
    /// Every position except the first, which is kept as the survivor.
    pub fn removable_positions(&self) -> &[usize] {
        self.positions.get(1..).unwrap_or(&[])
    }
}

/// Groups `items` by identity and returns the groups that occur more than once,
/// in order of first appearance.
///
/// Occurrences need not be adjacent: `[x, y, x]` groups both `x`s.
pub fn find_duplicates<T>(items: &[T]) -> Vec<DuplicateGroup<T>>
where
    T: Eq + Hash + Clone,
{
    collect_groups(items.iter().map(Some))
}

/// Like [`find_duplicates`], for listings with empty slots.
///
/// `None` slots still count toward positions but are never grouped.
pub fn find_duplicates_in_slots<T>(items: &[Option<T>]) -> Vec<DuplicateGroup<T>>
where
    T: Eq + Hash + Clone,
{
    collect_groups(items.iter().map(Option::as_ref))
}

fn collect_groups<'a, T, I>(items: I) -> Vec<DuplicateGroup<T>>
where
    T: Eq + Hash + Clone + 'a,
    I: IntoIterator<Item = Option<&'a T>>,
{
    let mut index: HashMap<&T, usize> = HashMap::new();
    let mut groups: Vec<DuplicateGroup<T>> = Vec::new();

    for (position, item) in items.into_iter().enumerate() {
        let Some(item) = item else { continue };

        match index.get(item) {
            Some(&slot) => groups[slot].positions.push(position),
            None => {
                index.insert(item, groups.len());
                groups.push(DuplicateGroup {
                    item: item.clone(),
                    positions: vec![position],
                });
            }
        }
    }

    groups.retain(|group| group.positions.len() > 1);
    groups
}
