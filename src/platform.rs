//! Platform device descriptors handed to `probe()` by the host.

/// A physical memory region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemResource {
    pub start: usize,
    pub len: usize,
}

impl MemResource {
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }
}

/// One resource descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Mem(MemResource),
    Irq(u32),
}

/// A platform device as matched by the host driver model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDevice {
    pub name: &'static str,
    /// Instance id; `-1` means "the only instance".
    pub id: i32,
    pub resources: Vec<Resource>,
}

impl PlatformDevice {
    pub fn new(name: &'static str, id: i32) -> Self {
        Self {
            name,
            id,
            resources: Vec::new(),
        }
    }

    pub fn with_resource(mut self, res: Resource) -> Self {
        self.resources.push(res);
        self
    }

    /// The `index`-th memory resource, counting memory resources only.
    pub fn mem(&self, index: usize) -> Option<MemResource> {
        self.resources
            .iter()
            .filter_map(|r| match r {
                Resource::Mem(m) => Some(*m),
                Resource::Irq(_) => None,
            })
            .nth(index)
    }

    /// The `index`-th interrupt line.
    pub fn irq(&self, index: usize) -> Option<u32> {
        self.resources
            .iter()
            .filter_map(|r| match r {
                Resource::Irq(n) => Some(*n),
                Resource::Mem(_) => None,
            })
            .nth(index)
    }
}
