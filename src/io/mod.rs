/// CSV export of decision reports.
pub mod export;
