//! General-purpose single-cell allocator without blocking.
//!
//! [`HeapAllocator`] is the default allocator for containers that do not
//! ask for pooling. It keeps one growable slot vector and a free list of
//! released slots, the same shape as a slab: released slots are reused
//! before the vector grows, and the vector never shrinks.

use std::fmt;

use chunkpool_core::{AllocError, BlockId, CellAddr, CellAllocator, Rebind};

/// All heap cells report this block ID.
const HEAP_BLOCK: BlockId = BlockId(0);

#[derive(Debug)]
struct Slot<T> {
    value: Option<T>,
    live: bool,
}

/// Unbounded slab allocator satisfying the [`CellAllocator`] contract.
pub struct HeapAllocator<T> {
    slots: Vec<Slot<T>>,
    /// Indices of released slots available for reuse.
    free_list: Vec<u32>,
}

impl<T> HeapAllocator<T> {
    /// Create an empty allocator.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Number of live cells.
    pub fn live_count(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    /// Total slots ever created (live + released).
    pub fn total_slots(&self) -> usize {
        self.slots.len()
    }

    fn slot_mut(&mut self, addr: CellAddr) -> Result<&mut Slot<T>, AllocError> {
        if addr.block() != HEAP_BLOCK {
            return Err(AllocError::InvalidAddress { addr });
        }
        match self.slots.get_mut(addr.index() as usize) {
            Some(slot) if slot.live => Ok(slot),
            _ => Err(AllocError::InvalidAddress { addr }),
        }
    }

    fn slot(&self, addr: CellAddr) -> Option<&Slot<T>> {
        if addr.block() != HEAP_BLOCK {
            return None;
        }
        self.slots.get(addr.index() as usize).filter(|s| s.live)
    }
}

impl<T> Default for HeapAllocator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for HeapAllocator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapAllocator")
            .field("live", &self.live_count())
            .field("slots", &self.total_slots())
            .finish()
    }
}

/// Heap allocators carry no configuration, so any two compare equal.
impl<T, U> PartialEq<HeapAllocator<U>> for HeapAllocator<T> {
    fn eq(&self, _other: &HeapAllocator<U>) -> bool {
        true
    }
}

impl<T> Eq for HeapAllocator<T> {}

impl<T> CellAllocator<T> for HeapAllocator<T> {
    fn allocate(&mut self, count: usize) -> Result<CellAddr, AllocError> {
        if count != 1 {
            return Err(AllocError::UnsupportedSize { requested: count });
        }
        let index = if let Some(reuse) = self.free_list.pop() {
            self.slots[reuse as usize].live = true;
            reuse
        } else {
            let index = u32::try_from(self.slots.len()).map_err(|_| {
                AllocError::CapacityExceeded {
                    limit: u32::MAX as usize,
                }
            })?;
            self.slots.push(Slot {
                value: None,
                live: true,
            });
            index
        };
        Ok(CellAddr::new(HEAP_BLOCK, index))
    }

    fn deallocate(&mut self, addr: CellAddr, count: usize) -> Result<(), AllocError> {
        if count != 1 {
            return Err(AllocError::UnsupportedSize { requested: count });
        }
        let slot = self.slot_mut(addr)?;
        slot.live = false;
        slot.value = None;
        self.free_list.push(addr.index());
        Ok(())
    }

    fn construct(&mut self, addr: CellAddr, value: T) -> Result<(), AllocError> {
        let slot = self.slot_mut(addr)?;
        if slot.value.is_some() {
            return Err(AllocError::InvalidAddress { addr });
        }
        slot.value = Some(value);
        Ok(())
    }

    fn destroy(&mut self, addr: CellAddr) -> Result<T, AllocError> {
        self.slot_mut(addr)?
            .value
            .take()
            .ok_or(AllocError::InvalidAddress { addr })
    }

    fn get(&self, addr: CellAddr) -> Option<&T> {
        self.slot(addr)?.value.as_ref()
    }

    fn get_mut(&mut self, addr: CellAddr) -> Option<&mut T> {
        self.slot_mut(addr).ok()?.value.as_mut()
    }
}

impl<T> Rebind for HeapAllocator<T> {
    type Other<U> = HeapAllocator<U>;

    fn rebind<U>(&self) -> Self::Other<U> {
        HeapAllocator::new()
    }
}
