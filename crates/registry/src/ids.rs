//! The two overlapping numeric id spaces and their loader-reserved ranges.
//!
//! Item ids live in `[0, MAXIMUM_ITEM_ID)`. Block ids live in the much smaller
//! `[0, MAXIMUM_BLOCK_ID)` but every block also has an item id: ids up to 255
//! are shared 1:1 with vanilla content, higher ones are shifted by
//! [`BLOCK_ITEM_SHIFT`] so they land past the vanilla item ids (256..1000).
//! This is what lets blocks and items share one entry table keyed in item
//! space.
//!
//! Entity-type ids are a third, unrelated space.

use serde::Serialize;

/// Offset between an item's legacy storage parameter and its id.
pub const PARAM_ITEM_ID_DIFF: i32 = 256;

/// Highest id shared 1:1 between the block and item spaces.
pub const SHARED_ID_MAX: i32 = 255;
/// Shift applied to block ids above [`SHARED_ID_MAX`] when seen as items.
pub const BLOCK_ITEM_SHIFT: i32 = 744;
/// First item id above [`SHARED_ID_MAX`] that can name a block again.
pub const FIRST_SHIFTED_BLOCK_ITEM_ID: i32 = SHARED_ID_MAX + 1 + BLOCK_ITEM_SHIFT;

/// Returned by [`convert_item_id_to_block_id`] for items with no block.
pub const NO_BLOCK_EQUIVALENT: i32 = -1;

// -- Loader-reserved ranges (half-open) --

pub const INITIAL_BLOCK_ID: i32 = 360;
/// Operating limit for block ids. The storage format tolerates up to
/// [`HARD_MAXIMUM_BLOCK_ID`].
pub const MAXIMUM_BLOCK_ID: i32 = 1024;
pub const HARD_MAXIMUM_BLOCK_ID: i32 = 1258;

pub const INITIAL_ITEM_ID: i32 = 4096;
/// Operating limit for item ids. The storage format tolerates up to
/// [`HARD_MAXIMUM_ITEM_ID`].
pub const MAXIMUM_ITEM_ID: i32 = 8192;
pub const HARD_MAXIMUM_ITEM_ID: i32 = 31999;

pub const INITIAL_ENTITY_TYPE_ID: i32 = 210;
// Entity type ids index a fixed-size array, stay well under it.
pub const MAXIMUM_ENTITY_TYPE_ID: i32 = 255;

/// [`INITIAL_BLOCK_ID`] seen from item space.
pub const INITIAL_TRANSLATED_BLOCK_ID: i32 = convert_block_id_to_item_id(INITIAL_BLOCK_ID);
/// [`MAXIMUM_BLOCK_ID`] seen from item space.
pub const MAXIMUM_TRANSLATED_BLOCK_ID: i32 = convert_block_id_to_item_id(MAXIMUM_BLOCK_ID);

// -- Fallbacks used when a reserved range runs dry --

/// Stone.
pub const DEFAULT_FALLBACK_BLOCK_ID: i32 = 1;
/// Planks.
pub const DEFAULT_FALLBACK_ITEM_ID: i32 = 5;
/// Pig.
pub const DEFAULT_FALLBACK_ENTITY_TYPE_ID: i32 = 90;

/// A block id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BlockId(pub i32);

/// An item id. Blocks have one too, see [`BlockId::to_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(pub i32);

/// An entity-type id. Never comparable with block or item ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityTypeId(pub i32);

impl BlockId {
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// The item id this block is stored under.
    pub const fn to_item(self) -> ItemId {
        ItemId(convert_block_id_to_item_id(self.0))
    }

    pub const fn is_loader_reserved(self) -> bool {
        self.0 >= INITIAL_BLOCK_ID && self.0 < MAXIMUM_BLOCK_ID
    }
}

impl ItemId {
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// The block this item places, if the id has a block meaning at all.
    pub const fn to_block(self) -> Option<BlockId> {
        match convert_item_id_to_block_id(self.0) {
            NO_BLOCK_EQUIVALENT => None,
            id => Some(BlockId(id)),
        }
    }

    pub const fn is_loader_reserved(self) -> bool {
        is_loader_reserved_item_id(self.0)
    }
}

impl EntityTypeId {
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    pub const fn is_loader_reserved(self) -> bool {
        is_loader_reserved_entity_type_id(self.0)
    }
}

/// Block id to item id. Ids above 255 are shifted past the vanilla items.
pub const fn convert_block_id_to_item_id(block_id: i32) -> i32 {
    if block_id > SHARED_ID_MAX {
        block_id + BLOCK_ITEM_SHIFT
    } else {
        block_id
    }
}

/// Item id to block id, or [`NO_BLOCK_EQUIVALENT`].
///
/// Left inverse of [`convert_block_id_to_item_id`] up to
/// [`MAXIMUM_TRANSLATED_BLOCK_ID`]. Vanilla-only item ids (256..1000) and
/// anything past the translated window have no block.
pub const fn convert_item_id_to_block_id(item_id: i32) -> i32 {
    if item_id > MAXIMUM_TRANSLATED_BLOCK_ID {
        NO_BLOCK_EQUIVALENT
    } else if item_id > SHARED_ID_MAX {
        if item_id < FIRST_SHIFTED_BLOCK_ITEM_ID {
            NO_BLOCK_EQUIVALENT
        } else {
            item_id - BLOCK_ITEM_SHIFT
        }
    } else {
        item_id
    }
}

/// Does `block_id` survive the trip into item space and back?
pub const fn has_item_space_form(block_id: i32) -> bool {
    block_id >= 0 && block_id <= MAXIMUM_BLOCK_ID
}

/// Is `item_id` reserved for loader use, either as a translated block id or
/// as a plain item id?
pub const fn is_loader_reserved_item_id(item_id: i32) -> bool {
    is_loader_reserved_block_item_id(item_id)
        || (item_id >= INITIAL_ITEM_ID && item_id < MAXIMUM_ITEM_ID)
}

/// Is `item_id` a translated block id reserved for loader use?
pub const fn is_loader_reserved_block_item_id(item_id: i32) -> bool {
    item_id >= INITIAL_TRANSLATED_BLOCK_ID && item_id < MAXIMUM_TRANSLATED_BLOCK_ID
}

pub const fn is_loader_reserved_entity_type_id(entity_type_id: i32) -> bool {
    entity_type_id >= INITIAL_ENTITY_TYPE_ID && entity_type_id < MAXIMUM_ENTITY_TYPE_ID
}

/// Which reserved range an allocation draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdSpace {
    /// Translated block ids, stored in item space.
    Block,
    Item,
    EntityType,
}

impl IdSpace {
    /// The reserved half-open range, in the space entries are stored in.
    pub const fn reserved_range(self) -> (i32, i32) {
        match self {
            IdSpace::Block => (INITIAL_TRANSLATED_BLOCK_ID, MAXIMUM_TRANSLATED_BLOCK_ID),
            IdSpace::Item => (INITIAL_ITEM_ID, MAXIMUM_ITEM_ID),
            IdSpace::EntityType => (INITIAL_ENTITY_TYPE_ID, MAXIMUM_ENTITY_TYPE_ID),
        }
    }

    pub const fn capacity(self) -> usize {
        let (start, end) = self.reserved_range();
        (end - start) as usize
    }
}
