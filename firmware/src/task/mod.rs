pub mod hold_transmitter;
