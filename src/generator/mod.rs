pub mod csv2wiki;
