// crates/cityseed-core/src/db/entities/mod.rs

//! sea-orm entities. `countries`, `regions` and `zones` are reference tables
//! owned by the reference loader; `cities` and `city_translations` are what
//! the city seeder writes.

pub mod city;
pub mod city_translation;
pub mod country;
pub mod region;
pub mod zone;

pub mod prelude {
    pub use super::city::Entity as City;
    pub use super::city_translation::Entity as CityTranslation;
    pub use super::country::Entity as Country;
    pub use super::region::Entity as Region;
    pub use super::zone::Entity as Zone;
}
