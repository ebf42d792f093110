mod setups;
mod world;

pub use world::WarehouseWorld;
