// Domain layer: tariff rules, holiday calendar and ports. No I/O here.

pub mod calendar;
pub mod message;
pub mod model;
pub mod ports;
pub mod tariff;
