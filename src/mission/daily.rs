//! First-round missions (13:10 batch)
//!
//! Each mission mirrors one in-game daily activity: fetch the relevant
//! pages, branch on the rendered text, and append the outcome lines the
//! player would want to see in the push message.

use async_trait::async_trait;

use super::{Mission, MissionContext, MissionResult};
use crate::extract::DEFAULT_PATTERN;

/// One draw each for the advanced and premium treasure tiers.
pub struct EvilTreasure;

#[async_trait]
impl Mission for EvilTreasure {
    fn id(&self) -> &'static str {
        "evil_treasure"
    }

    fn title(&self) -> &'static str {
        "邪神秘宝"
    }

    async fn run(&self, ctx: &mut MissionContext<'_>) -> MissionResult<()> {
        for tier in 0..2 {
            ctx.fetch(&format!("cmd=tenlottery&op=2&type={tier}")).await?;
            let line = ctx.extract_first(r"】</p>(.*?)<br />");
            ctx.append_opt(line);
        }
        Ok(())
    }
}

/// Claim the daily 150 beans of the month card.
pub struct MonthCard;

#[async_trait]
impl Mission for MonthCard {
    fn id(&self) -> &'static str {
        "month_card"
    }

    fn title(&self) -> &'static str {
        "斗豆月卡"
    }

    async fn run(&self, ctx: &mut MissionContext<'_>) -> MissionResult<()> {
        ctx.fetch("cmd=monthcard&sub=1").await?;
        let line = ctx.extract_first(r"<p>(.*?)<br />");
        ctx.append_opt(line);
        Ok(())
    }
}

/// Daily tournament sign-ups; the couple arena only opens Tue/Fri/Sun.
pub struct SignUp;

#[async_trait]
impl Mission for SignUp {
    fn id(&self) -> &'static str {
        "sign_up"
    }

    fn title(&self) -> &'static str {
        "报名"
    }

    async fn run(&self, ctx: &mut MissionContext<'_>) -> MissionResult<()> {
        // 武林大会
        ctx.fetch("cmd=fastSignWulin&ifFirstSign=1").await?;
        let line = if ctx.has("使用规则") {
            ctx.extract_first(r"】</p><p>(.*?)<br />")
        } else {
            ctx.extract_first(r"升级。<br />(.*?) ")
        };
        ctx.append_opt(line);

        // 侠侣争霸
        if matches!(ctx.weekday(), 2 | 5 | 7) {
            ctx.fetch("cmd=cfight&subtype=9").await?;
            let line = if ctx.has("使用规则") {
                ctx.extract_first(r"】</p><p>(.*?)<br />")
            } else {
                ctx.extract_first(r"报名状态.*?<br />(.*?)<br />")
            };
            ctx.append_opt(line);
        }

        // 笑傲群侠
        ctx.fetch("cmd=knightfight&op=signup").await?;
        let line = ctx.extract_first(r"侠士侠号.*?<br />(.*?)<br />");
        ctx.append_opt(line);
        Ok(())
    }
}

/// Up to ten free arena challenges, the daily reward, and an optional
/// point exchange driven by the `arena_exchange` setting.
pub struct Arena;

#[async_trait]
impl Mission for Arena {
    fn id(&self) -> &'static str {
        "arena"
    }

    fn title(&self) -> &'static str {
        "竞技场"
    }

    async fn run(&self, ctx: &mut MissionContext<'_>) -> MissionResult<()> {
        for _ in 0..10 {
            ctx.fetch("cmd=arena&op=challenge").await?;
            let line = ctx.extract_first(DEFAULT_PATTERN);
            ctx.append_opt(line);
            if ctx.has("免费挑战次数已用完") {
                break;
            }
        }

        ctx.fetch("cmd=arena&op=drawdaily").await?;
        let line = ctx.extract_first(DEFAULT_PATTERN);
        ctx.append_opt(line);

        if let Some(id) = ctx.setting_i64("arena_exchange") {
            if id > 0 {
                ctx.fetch(&format!("cmd=arena&op=exchange&id={id}&times=10"))
                    .await?;
                let line = ctx.extract_first(DEFAULT_PATTERN);
                ctx.append_opt(line);
            }
        }
        Ok(())
    }
}

/// Collect the wish reward, make the daily wish, open the pearl chest.
pub struct Wish;

#[async_trait]
impl Mission for Wish {
    fn id(&self) -> &'static str {
        "wish"
    }

    fn title(&self) -> &'static str {
        "许愿"
    }

    async fn run(&self, ctx: &mut MissionContext<'_>) -> MissionResult<()> {
        for sub in [5, 1, 6] {
            ctx.fetch(&format!("cmd=wish&sub={sub}")).await?;
            let line = ctx.extract_first(DEFAULT_PATTERN);
            ctx.append_opt(line);
        }
        Ok(())
    }
}

/// Attack the last (weakest) recommended manor in the open bracket, then
/// check the weapon exchange.
pub struct GrabTurf;

#[async_trait]
impl Mission for GrabTurf {
    fn id(&self) -> &'static str {
        "grab_turf"
    }

    fn title(&self) -> &'static str {
        "抢地盘"
    }

    async fn run(&self, ctx: &mut MissionContext<'_>) -> MissionResult<()> {
        ctx.fetch("cmd=recommendmanor&type=11&page=1").await?;
        let manors = ctx.extract_all(r#"manorid=(\d+)">攻占</a>"#);
        if let Some(id) = manors.last() {
            ctx.fetch(&format!("cmd=manorfight&fighttype=1&manorid={id}"))
                .await?;
            let line = ctx.extract_first(r"</p><p>(.*?)。");
            ctx.append_opt(line);
        }

        ctx.fetch("cmd=manor&sub=0").await?;
        let line = ctx.extract_first(r"<br /><br />(.*?)<br /><br />");
        ctx.append_opt(line);
        Ok(())
    }
}

/// Drive the faction mine: fight while a run is open, start a new run on
/// the configured floor/mode, collect the clear reward.
pub struct MineDungeon;

#[async_trait]
impl Mission for MineDungeon {
    fn id(&self) -> &'static str {
        "mine_dungeon"
    }

    fn title(&self) -> &'static str {
        "矿洞"
    }

    async fn run(&self, ctx: &mut MissionContext<'_>) -> MissionResult<()> {
        let floor = ctx.require_i64("mine.floor")?;
        let mode = ctx.require_i64("mine.mode")?;

        ctx.fetch("cmd=factionmine").await?;
        for _ in 0..5 {
            if ctx.has("副本挑战中") {
                ctx.fetch("cmd=factionmine&op=fight").await?;
                let line = ctx.extract_first(DEFAULT_PATTERN);
                ctx.append_opt(line);
                if ctx.has("挑战次数不足") {
                    break;
                }
            } else if ctx.has("开启副本") {
                ctx.fetch(&format!("cmd=factionmine&op=start&floor={floor}&mode={mode}"))
                    .await?;
                let line = ctx.extract_first(DEFAULT_PATTERN);
                ctx.append_opt(line);
                if ctx.has("当前不能开启此副本") {
                    break;
                }
            } else if ctx.has("领取奖励") {
                ctx.fetch("cmd=factionmine&op=reward").await?;
                let line = ctx.extract_first(DEFAULT_PATTERN);
                ctx.append_opt(line);
            } else {
                break;
            }
        }
        Ok(())
    }
}

/// Let the monkey king sweep the configured zodiac scene.
pub struct ZodiacDungeon;

#[async_trait]
impl Mission for ZodiacDungeon {
    fn id(&self) -> &'static str {
        "zodiac_dungeon"
    }

    fn title(&self) -> &'static str {
        "十二宫"
    }

    async fn run(&self, ctx: &mut MissionContext<'_>) -> MissionResult<()> {
        let scene = ctx.require_i64("zodiac")?;

        ctx.fetch(&format!("cmd=zodiacdungeon&op=autofight&scene_id={scene}"))
            .await?;
        let line = if ctx.has("恭喜你") {
            ctx.extract_first(r"恭喜你，(.*?)！")
        } else if ctx.has("是否复活再战") {
            ctx.extract_first(r"<br.*>(.*?)，")
        } else {
            // 阵亡、挑战次数不足、进度不足等
            ctx.extract_first(r"<p>(.*?)<br />")
        };
        ctx.append_opt(line);
        Ok(())
    }
}
