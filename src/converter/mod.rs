pub mod csv2rows;
