use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::command::{Command, CommandOutcome, help_text, parse_command_text};
use crate::error::{AppError, AppResult};

use super::core::Storefront;

/// Line-oriented command loop. Each applied command waits for its listing
/// before the next line is read.
pub async fn run_session<R, W>(
    storefront: &mut Storefront,
    input: R,
    mut output: W,
) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    storefront.open();
    storefront.settle().await;
    write_view(storefront, &mut output).await?;

    let mut lines = input.lines();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|source| AppError::io_with_context(source, "failed to read command"))?
    {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match parse_command_text(line) {
            Ok(command) => command,
            Err(err) => {
                write_line(&mut output, &format!("error: {err}")).await?;
                continue;
            }
        };

        match command {
            Command::Help => {
                write_line(&mut output, &help_text()).await?;
                continue;
            }
            Command::Show => {
                storefront.drain_background();
                write_view(storefront, &mut output).await?;
                continue;
            }
            _ => {}
        }

        match storefront.execute(command) {
            Ok(CommandOutcome::QuitRequested) => break,
            Ok(CommandOutcome::Noop) => write_line(&mut output, "(no change)").await?,
            Ok(CommandOutcome::Applied) => {
                storefront.settle().await;
                write_view(storefront, &mut output).await?;
            }
            Err(err) => write_line(&mut output, &format!("error: {err}")).await?,
        }
    }

    output
        .flush()
        .await
        .map_err(|source| AppError::io_with_context(source, "failed to flush output"))
}

async fn write_view<W>(storefront: &Storefront, output: &mut W) -> AppResult<()>
where
    W: AsyncWrite + Unpin,
{
    let drawer = if storefront.drawer_open() {
        " [filters open]"
    } else {
        ""
    };
    let view = format!("{}{drawer}\n{}", storefront.address(), storefront.render());
    write_line(output, &view).await
}

async fn write_line<W>(output: &mut W, text: &str) -> AppResult<()>
where
    W: AsyncWrite + Unpin,
{
    output
        .write_all(format!("{text}\n").as_bytes())
        .await
        .map_err(|source| AppError::io_with_context(source, "failed to write output"))
}
