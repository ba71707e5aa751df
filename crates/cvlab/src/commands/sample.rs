//! Sample command - the synthetic resume used by batch renders

use crate::output::print_json;
use anyhow::Result;
use cvlab_core::build_context;
use cvlab_core::resume::sample_cv;

pub fn run(context: bool) -> Result<()> {
    let cv = sample_cv();
    if context {
        print_json(&build_context(&cv))
    } else {
        print_json(&cv)
    }
}
