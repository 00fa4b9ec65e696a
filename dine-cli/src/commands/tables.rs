use crate::cli::TablesSubcommand;
use crate::context::Context;
use crate::error::CliResult;
use shared::models::{DiningTable, DiningTableUpdate};

fn print_table(table: &DiningTable) {
    let times = match (table.start_time, table.end_time) {
        (Some(start), Some(end)) => format!("{} - {}", start.format("%H:%M"), end.format("%H:%M")),
        (Some(start), None) => format!("since {}", start.format("%H:%M")),
        _ => String::new(),
    };
    println!(
        "{:>5}  {:<12} {:>2}/{:<2} seats  {:<8} {}",
        table.id,
        table.table_name,
        table.seats_count,
        table.capacity,
        if table.is_occupied() { "occupied" } else { "ready" },
        times,
    );
}

pub async fn run(ctx: &Context, command: TablesSubcommand) -> CliResult<()> {
    match command {
        TablesSubcommand::Floors => {
            for floor in ctx.client.floors().await? {
                match floor.id {
                    Some(id) => println!("{id:>5}  {}", floor.name),
                    None => println!("       {}", floor.name),
                }
            }
        }
        TablesSubcommand::List { floor } => {
            ctx.client.tables(&floor).await?.iter().for_each(print_table);
        }
        TablesSubcommand::Show { id } => print_table(&ctx.client.table(id).await?),
        TablesSubcommand::Update {
            id,
            start,
            end,
            seats,
            ready,
        } => {
            let update = DiningTableUpdate {
                start_time: start,
                end_time: end,
                seats_count: seats,
                is_ready: ready,
            };
            print_table(&ctx.client.update_table(id, &update).await?);
        }
    }
    Ok(())
}
