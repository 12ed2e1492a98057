use tweenlet::{DeltaClock, Equation, LoopType, TimeController, TweenConfig, TweenEvent};

/// Example of driving a single ping-pong tween from the wall clock
fn main() -> tweenlet::Result<()> {
    env_logger::init();

    println!("〰️ Tweenlet Pulse Example");
    println!("=========================");

    // A brightness pulse: 0 -> 1 and back, three extra passes, smoothstep
    let config = TweenConfig::new(0.0, 1.0, 0.4)
        .with_equation(Equation::new(|t| t * t * (3.0 - 2.0 * t)))
        .with_loops(Some(3), LoopType::PingPong);
    let mut pulse = TimeController::new(config)?;

    // Lifecycle notifications arrive through a polled channel
    let (_subscription, events) = pulse.subscribe_channel();

    pulse.play();
    println!("✅ Controller playing: {:?}", pulse.play_state());

    let mut clock = DeltaClock::new();
    while pulse.is_playing() {
        std::thread::sleep(std::time::Duration::from_millis(16));
        pulse.tick(clock.delta());

        for event in events.try_iter() {
            match event {
                TweenEvent::ValueUpdated { value, time, .. } => {
                    let bar = "#".repeat((value * 30.0).round() as usize);
                    println!("   t={time:.2} {bar}");
                }
                TweenEvent::LoopCompleted { loops } => {
                    println!("🔁 Pass {} complete", loops);
                }
                TweenEvent::Completed => {
                    println!("🏁 Budget exhausted");
                }
                TweenEvent::StateChanged { previous, current } => {
                    println!("   State: {:?} -> {:?}", previous, current);
                }
            }
        }
    }

    println!("\n📊 Final state:");
    println!("   Value: {:.3}", pulse.current_value());
    println!("   Progress: {:.3}", pulse.current_time());
    println!("   State: {:?}", pulse.play_state());

    println!("\n✅ Pulse example completed successfully!");
    Ok(())
}
