use anyhow::Context;
use clap::Parser;
use hotel_booking::config::{Command, OutputFormat};
use hotel_booking::utils::logger;
use hotel_booking::utils::validation::validate_non_empty_string;
use hotel_booking::{
    Booking, BookingManager, BookingService, CliConfig, Clock, FixedClock, HotelConfig, JsonFileRepository,
    Repository, Room, SystemClock,
};

type Manager = BookingManager<JsonFileRepository<Booking>, JsonFileRepository<Room>, FixedClock>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入並驗證配置
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    };

    // 初始化日誌
    if config.logging.json {
        logger::init_json_logger(&config.logging.level, cli.verbose);
    } else {
        logger::init_cli_logger(&config.logging.level, cli.verbose);
    }
    tracing::debug!("Resolved config: {:?}", config);

    let rooms = JsonFileRepository::<Room>::new(config.rooms_path());
    let bookings = JsonFileRepository::<Booking>::new(config.bookings_path());
    seed_rooms(&rooms, &config)
        .await
        .with_context(|| format!("failed to seed rooms into {}", rooms.path().display()))?;

    let today = cli.today.unwrap_or_else(|| SystemClock.today());
    let manager = BookingManager::with_clock(bookings, rooms, FixedClock(today));

    if let Err(e) = run(&cli.command, &manager).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        std::process::exit(e.severity().exit_code());
    }

    Ok(())
}

async fn seed_rooms(rooms: &JsonFileRepository<Room>, config: &HotelConfig) -> hotel_booking::Result<()> {
    if config.rooms.is_empty() || !rooms.get_all().await?.is_empty() {
        return Ok(());
    }

    for room in config.seed_rooms() {
        rooms.add(room).await?;
    }
    tracing::info!("Seeded {} rooms from configuration", config.rooms.len());
    Ok(())
}

async fn run(command: &Command, manager: &Manager) -> hotel_booking::Result<()> {
    match command {
        Command::Rooms => {
            let rooms = manager.room_repository().get_all().await?;
            if rooms.is_empty() {
                println!("No rooms on file");
            }
            for room in rooms {
                println!("{}\t{}", room.id, room.description);
            }
        }
        Command::AddRoom { description, id } => {
            validate_non_empty_string("description", description)?;
            manager
                .room_repository()
                .add(Room::new(id.unwrap_or(0), description.as_str()))
                .await?;
            println!("✅ Room added");
        }
        Command::Find(range) => match manager.find_available_room(range.start, range.end).await? {
            Some(room_id) => println!("Room {} is available from {} to {}", room_id, range.start, range.end),
            None => println!("No room available from {} to {}", range.start, range.end),
        },
        Command::Occupied { range, format } => {
            let dates = manager.get_fully_occupied_dates(range.start, range.end).await?;
            match format {
                OutputFormat::Text => {
                    if dates.is_empty() {
                        println!("No fully occupied dates between {} and {}", range.start, range.end);
                    }
                    for date in &dates {
                        println!("{}", date);
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&dates)?),
                OutputFormat::Csv => {
                    let mut wtr = csv::WriterBuilder::new()
                        .has_headers(true)
                        .from_writer(std::io::stdout());
                    wtr.write_record(["date"])?;
                    for date in &dates {
                        wtr.write_record([date.to_string()])?;
                    }
                    wtr.flush()?;
                }
            }
        }
        Command::Book(range) => {
            if manager.create_booking(Booking::request(range.start, range.end)).await? {
                println!("✅ Booking confirmed from {} to {}", range.start, range.end);
            } else {
                println!("No room available from {} to {}; nothing was booked", range.start, range.end);
            }
        }
        Command::Bookings { all } => {
            let bookings = manager.booking_repository().get_all().await?;
            for b in bookings.iter().filter(|b| *all || b.is_active) {
                let status = if b.is_active { "active" } else { "cancelled" };
                println!("{}\troom {}\t{} .. {}\t{}", b.id, b.room_id, b.start_date, b.end_date, status);
            }
        }
        Command::Cancel { id } => {
            let mut booking = manager.booking_repository().get(*id).await?;
            if !booking.is_active {
                println!("Booking {} is already cancelled", id);
                return Ok(());
            }
            booking.is_active = false;
            manager.booking_repository().edit(booking).await?;
            tracing::info!("Cancelled booking {}", id);
            println!("✅ Booking {} cancelled", id);
        }
    }

    Ok(())
}
