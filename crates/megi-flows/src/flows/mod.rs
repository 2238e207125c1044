pub mod dispute;
pub mod gig;
pub mod job_posting;
pub mod payment;
pub mod proposal;
