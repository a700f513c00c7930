pub mod hit;

pub use hit::{HitPriority, HitTester, KurboHitTester, hit_test};
