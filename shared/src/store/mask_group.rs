use crate::types::{DefinitionId, MaskGroupKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct MaskMember {
    id: DefinitionId,
    mask: u8,
    flag: bool,
}

/// Boolean flags sharing one wire byte. The byte is only ever derived from
/// the flags for encoding; reads go to the flags themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskGroup {
    key: MaskGroupKey,
    members: Vec<MaskMember>,
}

impl MaskGroup {
    pub fn new(key: MaskGroupKey) -> Self {
        Self {
            key,
            members: Vec::new(),
        }
    }

    pub fn key(&self) -> MaskGroupKey {
        self.key
    }

    pub fn add(&mut self, id: DefinitionId, mask: u8, flag: bool) {
        self.members.push(MaskMember { id, mask, flag });
    }

    /// Returns false if `id` is not a member
    pub fn set(&mut self, id: DefinitionId, flag: bool) -> bool {
        let Some(member) = self.members.iter_mut().find(|member| member.id == id) else {
            return false;
        };
        member.flag = flag;
        true
    }

    pub fn get(&self, id: DefinitionId) -> Option<bool> {
        self.members
            .iter()
            .find(|member| member.id == id)
            .map(|member| member.flag)
    }

    /// OR of the mask of every member whose flag is set
    pub fn bits(&self) -> u8 {
        self.members
            .iter()
            .filter(|member| member.flag)
            .fold(0, |bits, member| bits | member.mask)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
