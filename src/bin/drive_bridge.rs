/**
 * Drive bridge
 *
 * Connects the drive topics to the microcontroller over UART:
 * 1. Commands on the command topic are written to the serial port
 * 2. Status frames from the port are published on the status topic
 *
 * Operator commands are read from stdin, one `<steering> <speed> <accel>`
 * per line. EOF shuts the bridge down and releases the port.
 */

use std::io::{self, BufRead};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use drive_bridge::bridge::{Bridge, BridgeContext, CommandSink};
use drive_bridge::config::{BridgeConfig, COMMAND_TOPIC, DEFAULT_BAUD, DEFAULT_SERIAL_PORT, STATUS_TOPIC};
use drive_bridge::pubsub::{DriveMsg, Publisher, Subscriber, TopicRegistry};
use drive_bridge::uart::open_port;

/// UART bridge between drive topics and the steering/throttle controller.
#[derive(Parser, Debug)]
#[command(name = "drive-bridge", version)]
struct Cli{
    /// Serial device of the microcontroller.
    #[arg(long, default_value = DEFAULT_SERIAL_PORT)]
    port: String,
    #[arg(long, default_value_t = DEFAULT_BAUD)]
    baud: u32,
    /// Topic carrying inbound drive commands.
    #[arg(long, default_value = COMMAND_TOPIC)]
    command_topic: String,
    /// Topic the decoded status is published on.
    #[arg(long, default_value = STATUS_TOPIC)]
    status_topic: String,
}

fn parse_command(line: &str) -> Option<DriveMsg>{
    let mut fields = line.split_whitespace().map(|f| f.parse::<f32>());
    let msg = DriveMsg::new(
        fields.next()?.ok()?,
        fields.next()?.ok()?,
        fields.next()?.ok()?,
    );
    if fields.next().is_some(){
        return None;
    }
    Some(msg)
}

fn main() -> Result<()>{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = BridgeConfig::new(&cli.port).with_baud(cli.baud);
    config.command_topic = cli.command_topic;
    config.status_topic = cli.status_topic;

    let registry = TopicRegistry::new();
    let command_topic = registry.get_or_create::<DriveMsg>(&config.command_topic, config.queue_depth);
    let status_topic = registry.get_or_create::<DriveMsg>(&config.status_topic, config.queue_depth);

    let port = open_port(&config)
        .with_context(|| format!("failed to open serial port {}", config.port_name))?;
    let context = BridgeContext::new(port, Publisher::new(Arc::clone(&status_topic)));
    let (worker, mut handle) = Bridge::start(context, &config);
    log::info!(
        "bridge: {}@{} | {} -> MCU -> {}",
        config.port_name, config.baud_rate, config.command_topic, config.status_topic
    );

    let running = Arc::new(AtomicBool::new(true));

    //command topic -> bridge
    let forwarder = {
        let subscriber = Subscriber::new(Arc::clone(&command_topic));
        let sink = handle.command_sender();
        let running = Arc::clone(&running);
        thread::spawn(move ||{
            while running.load(Ordering::SeqCst){
                if let Some(msg) = subscriber.recv_timeout(Duration::from_millis(100)){
                    sink.on_command(msg.into());
                }
            }
        })
    };

    //status topic -> log
    let monitor = {
        let subscriber = Subscriber::new(Arc::clone(&status_topic));
        let running = Arc::clone(&running);
        thread::spawn(move ||{
            while running.load(Ordering::SeqCst){
                if let Some(msg) = subscriber.recv_timeout(Duration::from_millis(100)){
                    log::info!("<- MCU: s={:.2} v={:.2} a={:.2}", msg.steering_angle, msg.speed, msg.acceleration);
                }
            }
        })
    };

    let command_publisher = Publisher::new(command_topic);
    for line in io::stdin().lock().lines(){
        let line = line.context("failed to read stdin")?;
        let line = line.trim();
        if line.is_empty(){
            continue;
        }
        match parse_command(line){
            Some(msg) =>{
                log::info!("-> MCU: s={:.2} v={:.2}", msg.steering_angle, msg.speed);
                command_publisher.publish(msg);
            }
            None => log::warn!("expected `<steering> <speed> <accel>`, got {:?}", line),
        }
    }

    log::info!("stdin closed, shutting down");
    running.store(false, Ordering::SeqCst);
    let _ = forwarder.join();
    handle.shutdown();
    let _ = monitor.join();
    match worker.join(){
        Ok(stats) => log::info!("serial port released ({:?})", stats),
        Err(_) => anyhow::bail!("bridge thread panicked"),
    }
    Ok(())
}
