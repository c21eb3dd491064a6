use crate::resources::{Resource, ResourceType};

#[derive(Debug, Clone, PartialEq, Eq)]
struct TypeList {
    res_type: ResourceType,
    resources: Vec<Resource>,
}

/// The resources of a file, grouped by type.
///
/// Types keep the order in which they were first added, and each type's
/// resources keep insertion order. Loaders add entries in on-disk order,
/// which is also ascending start-offset order; the offset range of a
/// resource is derived from the entry that follows it, so nothing may
/// reorder a list after it is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceTable {
    types: Vec<TypeList>,
}

impl ResourceTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a resource to the end of its type's list.
    pub fn push(&mut self, resource: Resource) {
        let res_type = resource.res_type();
        match self.types.iter_mut().find(|list| list.res_type == res_type) {
            Some(list) => list.resources.push(resource),
            None => self.types.push(TypeList {
                res_type,
                resources: vec![resource],
            }),
        }
    }

    pub fn types(&self) -> impl Iterator<Item = ResourceType> + '_ {
        self.types.iter().map(|list| list.res_type)
    }

    #[must_use]
    pub fn contains_type(&self, res_type: ResourceType) -> bool {
        self.types.iter().any(|list| list.res_type == res_type)
    }

    /// The resources of one type, in table order. Empty if the type is absent.
    #[must_use]
    pub fn resources(&self, res_type: ResourceType) -> &[Resource] {
        self.types
            .iter()
            .find(|list| list.res_type == res_type)
            .map_or(&[][..], |list| list.resources.as_slice())
    }

    /// The position of a resource within its type's list.
    #[must_use]
    pub fn index_of(&self, res_type: ResourceType, id: u16) -> Option<usize> {
        self.resources(res_type)
            .iter()
            .position(|res| res.id() == id)
    }

    #[must_use]
    pub fn get(&self, res_type: ResourceType, id: u16) -> Option<&Resource> {
        self.resources(res_type).iter().find(|res| res.id() == id)
    }

    #[must_use]
    pub fn get_index(&self, res_type: ResourceType, index: usize) -> Option<&Resource> {
        self.resources(res_type).get(index)
    }

    /// All resources, type by type, in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Resource> + '_ {
        self.types.iter().flat_map(|list| list.resources.iter())
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Resource> + '_ {
        self.types.iter_mut().flat_map(|list| list.resources.iter_mut())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.iter().map(|list| list.resources.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> IntoIterator for &'a ResourceTable {
    type Item = &'a Resource;
    type IntoIter = Box<dyn Iterator<Item = &'a Resource> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl FromIterator<Resource> for ResourceTable {
    fn from_iter<I: IntoIterator<Item = Resource>>(iter: I) -> Self {
        let mut table = ResourceTable::new();
        for resource in iter {
            table.push(resource);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> ResourceTable {
        [
            Resource::new(128, ResourceType::Pict, 0x00),
            Resource::new(129, ResourceType::Pict, 0x20),
            Resource::new(128, ResourceType::Snd, 0x40),
            Resource::new(130, ResourceType::Pict, 0x60),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn groups_by_type_in_first_seen_order() {
        let table = sample_table();
        assert_eq!(
            table.types().collect::<Vec<_>>(),
            vec![ResourceType::Pict, ResourceType::Snd]
        );
        let ids: Vec<u16> = table
            .resources(ResourceType::Pict)
            .iter()
            .map(Resource::id)
            .collect();
        assert_eq!(ids, vec![128, 129, 130]);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn ids_are_scoped_to_types() {
        let table = sample_table();
        assert_eq!(table.get(ResourceType::Pict, 128).unwrap().start_offset(), 0x00);
        assert_eq!(table.get(ResourceType::Snd, 128).unwrap().start_offset(), 0x40);
        assert_eq!(table.index_of(ResourceType::Pict, 130), Some(2));
        assert_eq!(table.index_of(ResourceType::Snd, 130), None);
    }

    #[test]
    fn missing_type_is_empty() {
        let table = sample_table();
        assert!(table.resources(ResourceType::Code).is_empty());
        assert!(!table.contains_type(ResourceType::Code));
        assert!(table.get_index(ResourceType::Code, 0).is_none());
        assert!(table.get_index(ResourceType::Pict, 3).is_none());
    }

    #[test]
    fn iterates_type_by_type() {
        let table = sample_table();
        let offsets: Vec<u32> = table.iter().map(Resource::start_offset).collect();
        assert_eq!(offsets, vec![0x00, 0x20, 0x60, 0x40]);
    }
}
