pub mod blokus;
