pub mod ledger;
pub mod payment;

pub use ledger::{Booking, BookingLedger, BookingRequest, BookingStatus, LedgerError, Passenger};
pub use payment::{authorize, BillingAddress, PaymentError, PaymentInfo};
