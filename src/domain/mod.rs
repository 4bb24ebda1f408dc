// Domain layer: obituary records, the publisher/config ports and the date rules.

pub mod model;
pub mod ports;

pub mod services;
