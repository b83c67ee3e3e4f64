use std::env;

use chrono::Local;
use room_scheduler::client::RoomsClient;
use room_scheduler::presentation::{
    RoomFilter, RoomMatch, Weather, shift_color, status_label, unique_rooms, unique_shifts,
};

struct Args {
    all: bool,
    day: Option<String>,
    shift: Option<String>,
    room: Option<String>,
}

fn parse_args() -> Args {
    let mut args = Args {
        all: false,
        day: None,
        shift: None,
        room: None,
    };

    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--all" => args.all = true,
            "--day" => args.day = iter.next(),
            "--shift" => args.shift = iter.next(),
            "--room" => args.room = iter.next(),
            other => eprintln!("ignoring unknown argument {other}"),
        }
    }
    args
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let args = parse_args();
    let base_url = env::var("ROOMS_API_URL").unwrap_or_else(|_| "http://localhost:3001".to_string());

    let client = RoomsClient::new(base_url.as_str())?;
    let rooms = match client.list_rooms().await {
        Ok(rooms) => rooms,
        Err(e) => {
            eprintln!("Erro ao carregar as salas: {e}");
            eprintln!("Tente novamente em instantes.");
            std::process::exit(1);
        }
    };

    let now = Local::now();
    let mut filter = if args.all {
        RoomFilter::default()
    } else {
        RoomFilter::for_now(&now)
    };
    if args.day.is_some() {
        filter.weekday = args.day;
    }
    if args.shift.is_some() {
        filter.shift = args.shift;
    }
    filter.room = args.room.map(RoomMatch::Contains);

    let weather = Weather::current(&now);
    let visible = filter.apply(&rooms);

    println!(
        "{} sala(s) de {} | dia: {} | turno: {}",
        visible.len(),
        rooms.len(),
        filter.weekday.as_deref().unwrap_or("todos"),
        filter.shift.as_deref().unwrap_or("todos"),
    );
    println!("turnos: {}", unique_shifts(&rooms).join(", "));
    println!("salas: {}", unique_rooms(&rooms).join(", "));

    if visible.is_empty() {
        println!("Nenhuma sala encontrada com os filtros selecionados.");
        return Ok(());
    }

    for room in visible {
        println!(
            "#{:<4} {:<10} {:<10} {:<8} {:<30} {} [{}]",
            room.id,
            room.sala_aula,
            room.turno,
            status_label(room.status),
            room.dias_semana.join(", "),
            room.disciplina,
            shift_color(weather, &room.turno),
        );
    }

    Ok(())
}
