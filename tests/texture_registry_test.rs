mod common;

use common::test_utils::*;
use lamplight::{
    error::TextureError,
    registry::{DecodedImage, MAX_TEXTURE_UNITS, NO_TEXTURE_SLOT, TextureHandle, TextureRegistry},
};

#[test]
fn slots_follow_load_order_and_restart_after_release() {
    lamplight::logging::init_for_tests();
    let mut backend = FakeTextures::new();
    let mut registry = TextureRegistry::new();

    for (i, tag) in ["A", "B", "C"].iter().enumerate() {
        let slot = registry
            .load_bytes(&mut backend, &rgba_png(2, 2, [1, 2, 3, 4]), tag)
            .unwrap();
        assert_eq!(slot, i as u32);
    }
    assert_eq!(registry.find_slot("B"), Some(1));

    registry.release(&mut backend);
    assert!(registry.is_empty());
    assert_eq!(backend.released.len(), 3);
    assert_eq!(backend.live(), 0);
    assert_eq!(registry.find_slot("A"), None);

    let slot = registry
        .load_bytes(&mut backend, &rgb_png(1, 1, [9, 9, 9]), "C")
        .unwrap();
    assert_eq!(slot, 0);
}

#[test]
fn two_channel_image_is_rejected_and_registers_nothing() {
    let mut backend = FakeTextures::new();
    let mut registry = TextureRegistry::new();

    let err = registry
        .load_bytes(&mut backend, &luma_alpha_png(4, 4), "grey")
        .unwrap_err();
    assert!(matches!(
        err,
        TextureError::UnsupportedFormat { channels: 2, .. }
    ));
    assert!(registry.is_empty());
    assert!(backend.uploads.is_empty());

    // the failed load did not burn a slot
    let slot = registry
        .load_bytes(&mut backend, &rgba_png(1, 1, [0; 4]), "next")
        .unwrap();
    assert_eq!(slot, 0);
}

#[test]
fn garbage_bytes_are_a_decode_error() {
    let mut backend = FakeTextures::new();
    let mut registry = TextureRegistry::new();
    let err = registry
        .load_bytes(&mut backend, b"definitely not a png", "junk")
        .unwrap_err();
    assert!(matches!(err, TextureError::Decode { .. }));
    assert!(registry.is_empty());
}

#[test]
fn missing_file_is_a_decode_error() {
    let mut backend = FakeTextures::new();
    let mut registry = TextureRegistry::new();
    let dir = scratch_dir();
    let err = registry
        .load(&mut backend, dir.path().join("nope.png"), "nope")
        .unwrap_err();
    assert!(matches!(err, TextureError::Decode { .. }));
    assert_eq!(registry.slot_index("nope"), NO_TEXTURE_SLOT);
}

#[test]
fn loads_from_disk() {
    let mut backend = FakeTextures::new();
    let mut registry = TextureRegistry::new();
    let dir = scratch_dir();
    let path = write_file(dir.path(), "wall.png", &rgb_png(4, 2, [200, 180, 150]));

    let slot = registry.load(&mut backend, &path, "Wall").unwrap();
    assert_eq!(slot, 0);
    let (tag, image) = &backend.uploads[0];
    assert_eq!(tag, "Wall");
    assert_eq!((image.width, image.height, image.channels), (4, 2, 3));
    assert_eq!(image.data.len(), 4 * 2 * 3);
}

#[test]
fn images_are_flipped_so_the_bottom_row_comes_first() {
    let mut backend = FakeTextures::new();
    let mut registry = TextureRegistry::new();
    registry
        .load_bytes(&mut backend, &red_over_blue_png(), "flag")
        .unwrap();

    let image = &backend.uploads[0].1;
    assert_eq!(&image.data[0..4], &[0, 0, 255, 255]);
    assert_eq!(&image.data[4..8], &[255, 0, 0, 255]);
}

#[test]
fn rgb_expands_to_opaque_rgba() {
    let image = DecodedImage::from_bytes(&rgb_png(1, 1, [10, 20, 30]), "px").unwrap();
    assert_eq!(image.channels, 3);
    assert_eq!(image.to_rgba8(), vec![10, 20, 30, 255]);
}

#[test]
fn lookups_miss_with_sentinels() {
    let registry = TextureRegistry::new();
    assert_eq!(registry.find_slot("nonexistent"), None);
    assert_eq!(registry.find_handle("nonexistent"), None);
    assert_eq!(registry.slot_index("nonexistent"), -1);
}

#[test]
fn bind_all_binds_every_slot_in_order() {
    let mut backend = FakeTextures::new();
    let mut registry = TextureRegistry::new();
    for tag in ["Copper", "Floor", "Wall"] {
        registry
            .load_bytes(&mut backend, &rgba_png(1, 1, [0; 4]), tag)
            .unwrap();
    }

    registry.bind_all(&mut backend);
    let first: Vec<_> = backend.binds.clone();
    assert_eq!(
        first,
        vec![
            (0, TextureHandle(100)),
            (1, TextureHandle(101)),
            (2, TextureHandle(102)),
        ]
    );

    registry.bind_all(&mut backend);
    assert_eq!(&backend.binds[3..], first.as_slice());
}

#[test]
fn registry_is_full_after_every_unit_is_taken() {
    let mut backend = FakeTextures::new();
    let mut registry = TextureRegistry::new();
    let pixel = DecodedImage {
        width: 1,
        height: 1,
        channels: 4,
        data: vec![0; 4],
    };
    for i in 0..MAX_TEXTURE_UNITS {
        registry
            .insert(&mut backend, &pixel, &format!("t{}", i))
            .unwrap();
    }

    let err = registry.insert(&mut backend, &pixel, "one too many").unwrap_err();
    assert!(matches!(err, TextureError::RegistryFull { limit: 16, .. }));
    assert_eq!(registry.len(), MAX_TEXTURE_UNITS);
    assert_eq!(backend.uploads.len(), MAX_TEXTURE_UNITS);
}

#[test]
fn duplicate_tag_keeps_first_entry_visible() {
    let mut backend = FakeTextures::new();
    let mut registry = TextureRegistry::new();
    registry
        .load_bytes(&mut backend, &rgba_png(1, 1, [1; 4]), "Glass")
        .unwrap();
    let second = registry
        .load_bytes(&mut backend, &rgba_png(1, 1, [2; 4]), "Glass")
        .unwrap();

    assert_eq!(second, 1);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.find_slot("Glass"), Some(0));
    assert_eq!(registry.find_handle("Glass"), Some(TextureHandle(100)));
}
