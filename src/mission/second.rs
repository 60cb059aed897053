//! Second-round missions (20:01 batch)

use async_trait::async_trait;
use rand::seq::SliceRandom;

use super::{Mission, MissionContext, MissionResult};
use crate::extract::DEFAULT_PATTERN;

/// Claim the four daily gift slots.
pub struct DailyGift;

#[async_trait]
impl Mission for DailyGift {
    fn id(&self) -> &'static str {
        "daily_gift"
    }

    fn title(&self) -> &'static str {
        "每日奖励"
    }

    async fn run(&self, ctx: &mut MissionContext<'_>) -> MissionResult<()> {
        for key in ["login", "meridian", "daren", "wuzitianshu"] {
            ctx.fetch(&format!("cmd=dailygift&op=draw&key={key}")).await?;
            let line = ctx.extract_first(DEFAULT_PATTERN);
            ctx.append_opt(line);
        }
        Ok(())
    }
}

/// Collect the accumulated apprentice experience.
pub struct ApprenticeExp;

#[async_trait]
impl Mission for ApprenticeExp {
    fn id(&self) -> &'static str {
        "apprentice_exp"
    }

    fn title(&self) -> &'static str {
        "领取徒弟经验"
    }

    async fn run(&self, ctx: &mut MissionContext<'_>) -> MissionResult<()> {
        ctx.fetch("cmd=exp").await?;
        let line = ctx.extract_first(r"每日奖励</a><br />(.*?)<br />");
        ctx.append_opt(line);
        Ok(())
    }
}

/// Report today's activity score and claim the activity and faction
/// gift bags.
pub struct Liveness;

#[async_trait]
impl Mission for Liveness {
    fn id(&self) -> &'static str {
        "liveness"
    }

    fn title(&self) -> &'static str {
        "今日活跃度"
    }

    async fn run(&self, ctx: &mut MissionContext<'_>) -> MissionResult<()> {
        ctx.fetch("cmd=liveness").await?;
        let line = ctx.extract_first(r"【(.*?)】");
        ctx.append_opt(line);
        if ctx.has("帮派总活跃") {
            let line = ctx.extract_first(r"礼包</a><br />(.*?)<");
            ctx.append_opt(line);
        }

        for giftbag_id in 1..=4 {
            ctx.fetch(&format!(
                "cmd=liveness_getgiftbag&giftbagid={giftbag_id}&action=1"
            ))
            .await?;
            let line = ctx.extract_first(r"】<br />(.*?)<p>");
            ctx.append_opt(line);
        }

        // 帮派总活跃奖励
        ctx.fetch("cmd=factionop&subtype=18").await?;
        let line = if ctx.has("创建帮派") {
            ctx.extract_first(r"帮派</a><br />(.*?)<br />")
        } else {
            ctx.extract_first(DEFAULT_PATTERN)
        };
        ctx.append_opt(line);
        Ok(())
    }
}

/// Open every chest still offering an open link.
pub struct DailyChest;

#[async_trait]
impl Mission for DailyChest {
    fn id(&self) -> &'static str {
        "daily_chest"
    }

    fn title(&self) -> &'static str {
        "每日宝箱"
    }

    async fn run(&self, ctx: &mut MissionContext<'_>) -> MissionResult<()> {
        ctx.fetch("cmd=dailychest").await?;
        for _ in 0..20 {
            let Some(chest_type) = ctx.extract_first(r#"type=(\d+)">打开"#) else {
                break;
            };
            ctx.fetch(&format!("cmd=dailychest&op=open&type={chest_type}"))
                .await?;
            let line = ctx.extract_first(r"说明</a><br />(.*?)<");
            ctx.append_opt(line);
            if ctx.has("今日开宝箱次数已达上限") {
                break;
            }
        }
        Ok(())
    }
}

/// Survey the point balances of every exchange shop.
pub struct ShopPoints;

const SHOP_QUERIES: &[&str] = &[
    "cmd=longdreamexchange",             // 江湖长梦
    "cmd=wlmz&op=view_exchange",         // 武林盟主
    "cmd=arena&op=queryexchange",        // 竞技场
    "cmd=ascendheaven&op=viewshop",      // 飞升大作战
    "cmd=abysstide&op=viewabyssshop",    // 深渊之潮
    "cmd=exchange&subtype=10&costtype=1", // 踢馆
    "cmd=exchange&subtype=10&costtype=2", // 掠夺
    "cmd=exchange&subtype=10&costtype=3", // 矿洞
    "cmd=exchange&subtype=10&costtype=4", // 镖行天下
    "cmd=exchange&subtype=10&costtype=9", // 幻境
    "cmd=exchange&subtype=10&costtype=10", // 群雄逐鹿
    "cmd=exchange&subtype=10&costtype=11", // 门派邀请赛
    "cmd=exchange&subtype=10&costtype=12", // 帮派祭坛
    "cmd=exchange&subtype=10&costtype=13", // 会武
    "cmd=exchange&subtype=10&costtype=14", // 问鼎天下
];

#[async_trait]
impl Mission for ShopPoints {
    fn id(&self) -> &'static str {
        "shop_points"
    }

    fn title(&self) -> &'static str {
        "商店"
    }

    async fn run(&self, ctx: &mut MissionContext<'_>) -> MissionResult<()> {
        for query in SHOP_QUERIES {
            ctx.fetch(query).await?;
            let line = ctx.extract_first(DEFAULT_PATTERN);
            ctx.append_opt(line);
        }
        Ok(())
    }
}

/// Guess odd or even at random until the day's rounds run out.
pub struct OddEven;

#[async_trait]
impl Mission for OddEven {
    fn id(&self) -> &'static str {
        "odd_even"
    }

    fn title(&self) -> &'static str {
        "猜单双"
    }

    async fn run(&self, ctx: &mut MissionContext<'_>) -> MissionResult<()> {
        ctx.fetch("cmd=oddeven").await?;
        for _ in 0..5 {
            let values = ctx.extract_all(r#"value=(\d+)">.*?数"#);
            let Some(value) = values.choose(&mut rand::thread_rng()).cloned() else {
                ctx.append("猜单双已经做过了");
                break;
            };

            ctx.fetch(&format!("cmd=oddeven&value={value}")).await?;
            let line = ctx.extract_first(DEFAULT_PATTERN);
            ctx.append_opt(line);
        }
        Ok(())
    }
}
