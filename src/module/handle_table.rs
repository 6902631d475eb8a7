use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// Opaque reference to one live chart inside an engine module.
///
/// The generation changes every time a slot is reused, so a handle kept
/// after `destroy` can never reach a newer chart in the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartHandle {
    index: u32,
    generation: u32,
}

impl ChartHandle {
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    #[must_use]
    pub fn index(self) -> u32 {
        self.index
    }

    #[must_use]
    pub fn generation(self) -> u32 {
        self.generation
    }

    fn unknown(self) -> ChartError {
        ChartError::UnknownHandle {
            index: self.index,
            generation: self.generation,
        }
    }

    fn stale(self) -> ChartError {
        ChartError::StaleHandle {
            index: self.index,
            generation: self.generation,
        }
    }
}

impl fmt::Display for ChartHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.index, self.generation)
    }
}

#[derive(Debug)]
enum Slot<T> {
    Live { generation: u32, value: T },
    Vacant { next_generation: u32 },
    /// Every generation of this slot has been issued.
    Retired,
}

impl<T> Slot<T> {
    /// Handles for this slot with a generation below this value were issued before.
    fn issued_below(&self) -> u32 {
        match self {
            Self::Live { generation, .. } => *generation,
            Self::Vacant { next_generation } => *next_generation,
            Self::Retired => u32::MAX,
        }
    }
}

/// Generational slot arena with a bounded number of live entries.
#[derive(Debug)]
pub struct HandleTable<T> {
    slots: Vec<Slot<T>>,
    free: SmallVec<[u32; 8]>,
    live: usize,
    max_live: usize,
}

impl<T> HandleTable<T> {
    #[must_use]
    pub fn new(max_live: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: SmallVec::new(),
            live: 0,
            max_live,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    #[must_use]
    pub fn max_live(&self) -> usize {
        self.max_live
    }

    pub fn insert(&mut self, value: T) -> ChartResult<ChartHandle> {
        if self.live >= self.max_live {
            return Err(ChartError::HandleLimit { max: self.max_live });
        }

        let handle = if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            let generation = slot.issued_below();
            *slot = Slot::Live { generation, value };
            ChartHandle::new(index, generation)
        } else {
            let index = u32::try_from(self.slots.len())
                .map_err(|_| ChartError::HandleLimit { max: self.max_live })?;
            self.slots.push(Slot::Live {
                generation: 0,
                value,
            });
            ChartHandle::new(index, 0)
        };

        self.live += 1;
        Ok(handle)
    }

    pub fn get(&self, handle: ChartHandle) -> ChartResult<&T> {
        match self.slots.get(handle.index as usize) {
            Some(Slot::Live { generation, value }) if *generation == handle.generation => Ok(value),
            Some(slot) => Err(classify_miss(slot, handle)),
            None => Err(handle.unknown()),
        }
    }

    pub fn get_mut(&mut self, handle: ChartHandle) -> ChartResult<&mut T> {
        self.get(handle)?;
        match self.slots.get_mut(handle.index as usize) {
            Some(Slot::Live { value, .. }) => Ok(value),
            _ => Err(handle.unknown()),
        }
    }

    #[must_use]
    pub fn contains(&self, handle: ChartHandle) -> bool {
        self.get(handle).is_ok()
    }

    /// Removes the entry and retires the handle.
    ///
    /// A slot whose generation counter is exhausted is never reused.
    pub fn remove(&mut self, handle: ChartHandle) -> ChartResult<T> {
        let slot = self
            .slots
            .get_mut(handle.index as usize)
            .ok_or_else(|| handle.unknown())?;
        match &*slot {
            Slot::Live { generation, .. } if *generation == handle.generation => {}
            other => return Err(classify_miss(other, handle)),
        }

        let replacement = match handle.generation.checked_add(1) {
            Some(next_generation) => {
                self.free.push(handle.index);
                Slot::Vacant { next_generation }
            }
            None => Slot::Retired,
        };
        match std::mem::replace(slot, replacement) {
            Slot::Live { value, .. } => {
                self.live -= 1;
                Ok(value)
            }
            _ => Err(handle.unknown()),
        }
    }

    /// Handles of all live entries, in slot order.
    pub fn handles(&self) -> impl Iterator<Item = ChartHandle> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                Slot::Live { generation, .. } => Some(ChartHandle::new(index as u32, *generation)),
                Slot::Vacant { .. } | Slot::Retired => None,
            })
    }
}

fn classify_miss<T>(slot: &Slot<T>, handle: ChartHandle) -> ChartError {
    if matches!(slot, Slot::Retired) || handle.generation < slot.issued_below() {
        handle.stale()
    } else {
        handle.unknown()
    }
}
