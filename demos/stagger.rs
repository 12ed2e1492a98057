use tweenlet::{DeltaClock, FixedStep, TimeController, TimeSource, TweenConfig, TweenManager};

/// Example of a manager fanning deltas from all three time sources out to a
/// group of tweens
fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("🎬 Tweenlet Stagger Example");
    println!("===========================");

    let mut tweens = TweenManager::new();

    // Three UI tweens of different lengths, driven by the frame clock
    let ui_tweens = [
        ("fade", 0.0, 1.0, 0.5),
        ("slide", -120.0, 0.0, 0.8),
        ("zoom", 0.5, 1.0, 1.1),
    ];
    for (id, start, end, duration) in ui_tweens {
        let controller = TimeController::new(TweenConfig::new(start, end, duration))?;
        tweens.insert(id, controller);
        println!("   Added '{}': {} -> {} over {}s", id, start, end, duration);
    }

    // One simulation tween stepped on a fixed 50 Hz cadence
    tweens.insert(
        "well-depth",
        TimeController::new(
            TweenConfig::new(0.0, 9.81, 1.0).with_time_source(TimeSource::Fixed),
        )?,
    );
    println!("   Added 'well-depth' on the fixed timestep");

    // A spinner that keeps real-time speed while everything else slows down
    tweens.insert(
        "spinner",
        TimeController::new(
            TweenConfig::new(0.0, 360.0, 1.0).with_time_source(TimeSource::Unscaled),
        )?,
    );
    println!("   Added 'spinner' on unscaled time");

    tweens.play_all();

    let mut clock = DeltaClock::new();
    clock.set_time_scale(0.5);
    let mut fixed = FixedStep::new(1.0 / 50.0)?;
    println!(
        "\n🚀 Driving {} tweens at time scale {}:",
        tweens.len(),
        clock.time_scale()
    );

    // Setup time must not count toward the first frame
    clock.reset();
    while tweens.any_playing() {
        std::thread::sleep(std::time::Duration::from_millis(16));
        // One measurement per frame, scaled by hand since both flavors are needed
        let real_dt = clock.delta_unscaled();
        let scaled_dt = real_dt * clock.time_scale();

        tweens.tick_source(TimeSource::Scaled, scaled_dt);
        tweens.tick_source(TimeSource::Unscaled, real_dt);
        for _ in 0..fixed.advance(scaled_dt) {
            tweens.tick_source(TimeSource::Fixed, fixed.step());
        }

        let fade = tweens.get("fade").map_or(0.0, |c| c.current_value());
        let slide = tweens.get("slide").map_or(0.0, |c| c.current_value());
        let zoom = tweens.get("zoom").map_or(0.0, |c| c.current_value());
        let depth = tweens.get("well-depth").map_or(0.0, |c| c.current_value());
        let spin = tweens.get("spinner").map_or(0.0, |c| c.current_value());
        println!(
            "   fade={:.2} slide={:7.2} zoom={:.2} depth={:.2} spin={:6.1}",
            fade, slide, zoom, depth, spin
        );
    }

    // Finished tweens rest in Stopped and can be pruned in one sweep
    let removed = tweens.prune_stopped();
    println!(
        "\n🧹 Pruned {} finished tweens, {} remain",
        removed,
        tweens.len()
    );

    println!("\n✅ Stagger example completed successfully!");
    Ok(())
}
