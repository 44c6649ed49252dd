// -----------------------------------------------------------------------------
// Category

/// Property indices sharing one category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: &'static str,
    indices: Box<[usize]>,
}

impl Category {
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Indices of the member properties, in declaration order.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }
}

/// Groups property indices by category, categories in first-seen order.
pub(crate) fn group_categories(names: impl Iterator<Item = &'static str>) -> Box<[Category]> {
    let mut groups: Vec<(&'static str, Vec<usize>)> = Vec::new();
    for (index, name) in names.enumerate() {
        match groups.iter_mut().find(|(group, _)| *group == name) {
            Some((_, members)) => members.push(index),
            None => groups.push((name, vec![index])),
        }
    }
    groups
        .into_iter()
        .map(|(name, indices)| Category {
            name,
            indices: indices.into_boxed_slice(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::group_categories;

    #[test]
    fn categories_keep_first_seen_order() {
        let groups = group_categories(["Main", "Physics", "Main", "Audio"].into_iter());
        let names: Vec<_> = groups.iter().map(|c| c.name()).collect();
        assert_eq!(names, ["Main", "Physics", "Audio"]);
        assert_eq!(groups[0].indices(), &[0, 2]);
        assert_eq!(groups[2].len(), 1);
    }
}
