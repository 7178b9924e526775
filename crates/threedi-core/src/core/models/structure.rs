use super::chain::Chain;

/// A set of chains read from one structure file (first model only).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Structure {
    pub id: String,
    pub chains: Vec<Chain>,
}

impl Structure {
    pub fn new(id: &str, chains: Vec<Chain>) -> Self {
        Self {
            id: id.to_string(),
            chains,
        }
    }

    pub fn chain(&self, id: char) -> Option<&Chain> {
        self.chains.iter().find(|c| c.id == id)
    }

    pub fn chain_ids(&self) -> impl Iterator<Item = char> + '_ {
        self.chains.iter().map(|c| c.id)
    }
}
