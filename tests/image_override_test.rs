// file: tests/image_override_test.rs
// version: 1.0.0
// guid: 3f1c9a2e-7b4d-4e8a-9c61-0d5e2b7a4f18

//! KETO_K8_IMAGE_URI handling
//!
//! Kept in its own test binary with a single test so nothing else in the
//! process reads the variable while it is set.

use keto::{
    constants::{DEFAULT_KETO_K8_IMAGE, KETO_K8_IMAGE_URI_ENV},
    userdata::{MasterRegistry, UserData, UserDater},
};

const OVERRIDE: &str = "registry.example.com/keto-k8:canary";

#[test]
fn test_image_override_from_environment() {
    let userdata = UserData::new().unwrap();
    let masters = MasterRegistry::from([(0, "10.0.0.1")]);

    std::env::remove_var(KETO_K8_IMAGE_URI_ENV);
    let compute = userdata
        .render_compute_cloud_config("aws", "prod-1", "v1.6.4")
        .unwrap();
    assert!(compute.as_str().contains(DEFAULT_KETO_K8_IMAGE));

    std::env::set_var(KETO_K8_IMAGE_URI_ENV, OVERRIDE);
    let compute = userdata
        .render_compute_cloud_config("aws", "prod-1", "v1.6.4")
        .unwrap();
    assert!(compute.as_str().contains(&format!("{} \\\n", OVERRIDE)));
    assert!(!compute.as_str().contains(DEFAULT_KETO_K8_IMAGE));

    // Masters always run the default image.
    let master = userdata
        .render_master_cloud_config("aws", "prod-1", "v1.6.4", &masters)
        .unwrap();
    assert!(master.as_str().contains(DEFAULT_KETO_K8_IMAGE));
    assert!(!master.as_str().contains(OVERRIDE));

    // Empty counts as unset.
    std::env::set_var(KETO_K8_IMAGE_URI_ENV, "");
    let compute = userdata
        .render_compute_cloud_config("aws", "prod-1", "v1.6.4")
        .unwrap();
    assert!(compute.as_str().contains(DEFAULT_KETO_K8_IMAGE));

    std::env::remove_var(KETO_K8_IMAGE_URI_ENV);
}
