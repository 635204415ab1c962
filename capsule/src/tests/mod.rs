mod builder;
mod fixtures;
