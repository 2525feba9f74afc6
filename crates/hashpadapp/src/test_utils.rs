use crate::address::MemoryAddress;
use crate::commands::Workspace;
use crate::config::HashpadConfig;
use crate::document::DocumentState;
use crate::store::memory::MemoryStore;
use crate::surface::{EditableSurface, TreeSurface};

/// In-memory collaborators for exercising commands without a browser or disk.
pub struct TestEnv {
    pub address: MemoryAddress,
    pub durable: MemoryStore,
    pub session: MemoryStore,
    pub surface: TreeSurface,
    pub config: HashpadConfig,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            address: MemoryAddress::new(),
            durable: MemoryStore::new(),
            session: MemoryStore::new(),
            surface: TreeSurface::new(),
            config: HashpadConfig::default(),
        }
    }

    /// Start at `address` (URL, `#fragment` or bare fragment).
    pub fn at(address: &str) -> Self {
        Self {
            address: MemoryAddress::at(address),
            ..Self::new()
        }
    }

    /// Start with `content` already rendered on the surface.
    pub fn with_content(content: &str) -> Self {
        let mut env = Self::new();
        env.surface.render(&DocumentState::new(content, ""));
        env
    }

    pub fn ws(&mut self) -> Workspace<'_> {
        Workspace {
            address: &mut self.address,
            durable: &self.durable,
            session: &self.session,
            surface: &mut self.surface,
            config: &self.config,
        }
    }
}
