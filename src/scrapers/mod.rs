pub mod dates;
pub mod extract;
pub mod session;
pub mod traits;
pub mod trip;
pub mod types;
pub mod unwrap;

pub use session::{HttpSession, PooledSessions};
pub use traits::{RawResponse, SessionFactory, Transport};
pub use trip::TripClient;
pub use types::HotelSearchParams;
