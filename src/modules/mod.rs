pub mod company;
pub mod invoices;
pub mod taxes;
