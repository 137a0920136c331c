mod coverage;
mod generator;
mod reference_model;
mod simulator;
