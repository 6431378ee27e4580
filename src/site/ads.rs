//! Ad slot fragments.
//!
//! Templates call `ad_unit(slot="...")` to get one of a fixed set of static
//! ad fragments, chosen uniformly at random on every call. The slot is only
//! used as the element id.

use std::collections::HashMap;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tera::Value;

/// The fixed fragment set. `{slot}` is replaced by the escaped slot id.
pub const AD_FRAGMENTS: [&str; 3] = [
    r##"<div class="ad-unit ad-service" id="{slot}">
    <h3>Sponsored: Cloud Hosting</h3>
    <p>Cut your hosting bill and scale on demand with our low-latency platform. 30% off your first year.</p>
    <a href="#" class="ad-link">Learn more &rarr;</a>
</div>"##,
    r##"<div class="ad-unit ad-product" id="{slot}">
    <h4>Advertisement</h4>
    <h2>New book: "The Future of Code"</h2>
    <p>The trends that will reshape software in the next decade. Out now in hardcover.</p>
    <a href="#" class="ad-link">Get the eBook</a>
</div>"##,
    r##"<div class="ad-unit ad-game" id="{slot}">
    <h4>Games - Sponsored</h4>
    <h2>Join Roulette Rooms and play!</h2>
    <p>Challenges, chat rooms and new friends every night. Jump in now.</p>
    <a href="https://roulette-rooms.lovable.app/" target="_blank" class="ad-link">Play now!</a>
</div>"##,
];

/// Pick one fragment uniformly at random and fill in the slot id.
pub fn pick_ad<R: Rng + ?Sized>(rng: &mut R, slot_id: &str) -> String {
    let fragment = AD_FRAGMENTS[rng.gen_range(0..AD_FRAGMENTS.len())];
    fragment.replace("{slot}", &tera::escape_html(slot_id))
}

/// The `ad_unit` template function.
pub struct AdUnitFunction<R = StdRng> {
    rng: Mutex<R>,
}

impl AdUnitFunction<StdRng> {
    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: RngCore> AdUnitFunction<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl<R: RngCore + Send> tera::Function for AdUnitFunction<R> {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let slot = match args.get("slot") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };

        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        Ok(Value::String(pick_ad(&mut *rng, &slot)))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tera::Function;

    fn variant_of(html: &str) -> Option<usize> {
        AD_FRAGMENTS
            .iter()
            .position(|fragment| fragment.replace("{slot}", "slot-1") == html)
    }

    #[test]
    fn test_all_variants_appear() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut counts = [0usize; AD_FRAGMENTS.len()];

        for _ in 0..1000 {
            let html = pick_ad(&mut rng, "slot-1");
            let variant = variant_of(&html).expect("fragment outside the fixed set");
            counts[variant] += 1;
        }

        assert!(counts.iter().all(|&c| c > 0), "counts: {counts:?}");
        assert_eq!(counts.iter().sum::<usize>(), 1000);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(pick_ad(&mut a, "x"), pick_ad(&mut b, "x"));
        }
    }

    #[test]
    fn test_slot_id_is_escaped() {
        let mut rng = StdRng::seed_from_u64(1);
        let html = pick_ad(&mut rng, r#""><script>"#);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn test_function_call() {
        let function = AdUnitFunction::with_rng(StdRng::seed_from_u64(3));
        let mut args = HashMap::new();
        args.insert("slot".to_string(), Value::String("slot-1".to_string()));

        let value = function.call(&args).unwrap();
        let html = value.as_str().unwrap();
        assert!(variant_of(html).is_some());
        assert!(function.is_safe());
    }
}
