mod network;
mod trainer;
