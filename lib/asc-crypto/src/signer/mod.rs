pub mod es256;
