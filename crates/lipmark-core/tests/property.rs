use std::collections::HashSet;
use std::panic;

use lipmark_core::{RenderOptions, render};

const CASES: usize = 300;
const MAX_LEN: usize = 400;
const CHARSET: &[char] = &[
    'a', 'b', 'c', 'x', 'y', 'z', '0', '1', ' ', ' ', '\n', '\n', '\t', '#', '%', '$', '?', '[',
    '[', ']', ']', '(', '(', ')', ')', '*', '^', '_', '~', '=', '|', '-', '–', '"', '.', '/', 'я',
];

#[test]
fn renderer_never_panics_on_random_input() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = Lcg::new(0x5eed_1ab5_0f0c_a11d);
    let options = RenderOptions::default();
    for case in 0..CASES {
        let len = rng.gen_range(0, MAX_LEN + 1);
        let source = random_string(&mut rng, len);
        let result = panic::catch_unwind(|| render(&source, &options));
        if result.is_err() {
            return Err(format!("render panicked for case {}: {:?}", case, source).into());
        }
    }
    Ok(())
}

#[test]
fn placeholders_never_reach_output_on_random_input() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = Lcg::new(0x0b5e_55ed_c0ff_ee42);
    let options = RenderOptions::default();
    for case in 0..CASES {
        let len = rng.gen_range(0, MAX_LEN + 1);
        let source = random_string(&mut rng, len);
        let html = render(&source, &options).html;
        if html.contains("__BLOCK_") {
            return Err(format!(
                "placeholder leaked for case {}\nSource:\n---\n{}\n---\nHTML:\n{}",
                case, source, html
            )
            .into());
        }
    }
    Ok(())
}

#[test]
fn collapsible_ids_are_unique_on_random_input() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = Lcg::new(0x1d5a_feed_0000_0007);
    let options = RenderOptions::default();
    for case in 0..CASES {
        let len = rng.gen_range(0, MAX_LEN + 1);
        let source = random_string(&mut rng, len);
        let html = render(&source, &options).html;
        let mut seen = HashSet::new();
        for id in collapsible_ids(&html) {
            if !seen.insert(id.to_string()) {
                return Err(format!("duplicate id {} for case {}: {:?}", id, case, source).into());
            }
        }
    }
    Ok(())
}

fn collapsible_ids(html: &str) -> Vec<&str> {
    let marker = "data-collapsible-id=\"";
    let mut ids = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find(marker) {
        let after = &rest[start + marker.len()..];
        let end = after.find('"').unwrap_or(after.len());
        ids.push(&after[..end]);
        rest = &after[end..];
    }
    ids
}

fn random_string(rng: &mut Lcg, len: usize) -> String {
    let mut out = String::with_capacity(len);
    for _ in 0..len {
        let idx = rng.gen_range(0, CHARSET.len());
        out.push(CHARSET.get(idx).copied().unwrap_or(' '));
    }
    out
}

struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state
    }

    fn gen_range(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }
        let span = max - min;
        let value = (self.next() >> 1) as usize;
        min + (value % span)
    }
}
