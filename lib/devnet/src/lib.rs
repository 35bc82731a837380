/*!
# Guessing Game Devnet

An in-process chain for exercising the guessing game end to end. A
[`Devnet`] owns the ledger, [`Account`]s fund and send transactions, and
deployed contracts are driven through typed handles mirroring their
on-chain interfaces.

Transactions are atomic: a reverted call rolls back every balance move,
storage write and log it produced, including the value it attached.

```rust,no_run
use alloy_primitives::U256;
use devnet::Devnet;
use guessing_game::utils::commitment;

# async fn example() -> Result<(), devnet::CallError> {
let devnet = Devnet::new();
let alice = devnet.create_account().await;
let game = alice
    .as_deployer()
    .deploy_guessing_game(commitment::commit(U256::from(42)))
    .await?;

game.guess(U256::from(42), guessing_game::game::GuessingGame::ADMISSION_PRICE)
    .await?;
# Ok(())
# }
```
*/
#![allow(clippy::module_name_repetitions)]
#![deny(rustdoc::broken_intra_doc_links)]

mod account;
mod chain;
mod contract;
mod deploy;
mod error;
mod receipt;

pub use account::{Account, DEFAULT_FUNDING};
pub use chain::Devnet;
pub use contract::{GuessingGameContract, GuessingTokenContract};
pub use deploy::Deployer;
pub use error::CallError;
pub use receipt::Receipt;
