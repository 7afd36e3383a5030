use roomsense::math::Vec3;
use roomsense::scene::{BoxScene, TaggedBox};

/// Half extent of the hall interior
pub const HALL_HALF_SIZE: f32 = 6.0;
pub const HALL_HEIGHT: f32 = 5.0;
const WALL: f32 = 0.5;
const DOOR_HALF_WIDTH: f32 = 1.5;
const DOOR_HEIGHT: f32 = 3.0;

/// Stone hall with a wooden door frame in its +X wall, standing on an open dirt field
pub fn hall_with_courtyard() -> BoxScene {
    let h = HALL_HALF_SIZE;
    let mut scene = BoxScene::new();

    // ground everywhere, hall floor on top
    scene.add(
        TaggedBox::new(Vec3::new(-100.0, -1.0, -100.0), Vec3::new(100.0, -WALL, 100.0))
            .with_tag("dirt"),
    );
    scene.add(
        TaggedBox::new(Vec3::new(-h - WALL, -WALL, -h - WALL), Vec3::new(h + WALL, 0.0, h + WALL))
            .with_tag("wood"),
    );

    // ceiling
    scene.add(
        TaggedBox::new(
            Vec3::new(-h - WALL, HALL_HEIGHT, -h - WALL),
            Vec3::new(h + WALL, HALL_HEIGHT + WALL, h + WALL),
        )
        .with_tag("stone"),
    );

    // -X, -Z and +Z walls
    scene.add(
        TaggedBox::new(Vec3::new(-h - WALL, 0.0, -h - WALL), Vec3::new(-h, HALL_HEIGHT, h + WALL))
            .with_tag("stone"),
    );
    scene.add(
        TaggedBox::new(Vec3::new(-h, 0.0, -h - WALL), Vec3::new(h, HALL_HEIGHT, -h))
            .with_tag("stone"),
    );
    scene.add(
        TaggedBox::new(Vec3::new(-h, 0.0, h), Vec3::new(h, HALL_HEIGHT, h + WALL))
            .with_tag("stone"),
    );

    // +X wall split around the doorway; the lintel also carries a more specific tag
    scene.add(
        TaggedBox::new(
            Vec3::new(h, 0.0, -h - WALL),
            Vec3::new(h + WALL, HALL_HEIGHT, -DOOR_HALF_WIDTH),
        )
        .with_tag("stone"),
    );
    scene.add(
        TaggedBox::new(
            Vec3::new(h, 0.0, DOOR_HALF_WIDTH),
            Vec3::new(h + WALL, HALL_HEIGHT, h + WALL),
        )
        .with_tag("stone"),
    );
    scene.add(
        TaggedBox::new(
            Vec3::new(h, DOOR_HEIGHT, -DOOR_HALF_WIDTH),
            Vec3::new(h + WALL, HALL_HEIGHT, DOOR_HALF_WIDTH),
        )
        .with_tag("stone")
        .with_tag("wood"),
    );

    scene
}

/// Point on the emitter's path for `progress` in 0.0 - 1.0: hall centre, through the door,
/// out into the courtyard
pub fn walk_path(progress: f32) -> Vec3 {
    let start = Vec3::new(-3.0, 1.5, 0.0);
    let end = Vec3::new(HALL_HALF_SIZE + 20.0, 1.5, 0.0);
    start.lerp(end, progress.clamp(0.0, 1.0))
}
