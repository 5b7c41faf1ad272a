pub mod bundles;

pub mod config;

pub mod evaluation;

pub mod participant;

pub mod score;

pub mod side;

pub mod sport;

pub mod timer;
