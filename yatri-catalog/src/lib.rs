pub mod generator;
pub mod record;

pub use generator::{CatalogError, CatalogGenerator, GeneratorConfig};
pub use record::{
    BusRecord, ClassFare, HotelRecord, MealCategory, MealRecord, TrainRecord,
};
