pub mod propeller;
