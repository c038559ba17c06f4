pub mod combine;
pub mod distributions;
