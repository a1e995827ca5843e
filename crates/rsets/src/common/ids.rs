use crate::define_id_type;

// Resource set, dense and stable for the lifetime of an inventory.
define_id_type!(RsetId, u32);

// Physical co-location boundary of resource sets (a node for sub-node resource sets).
define_id_type!(GroupId, u32);

// Position of a node in the global node list of an inventory.
define_id_type!(NodeIndex, u32);
